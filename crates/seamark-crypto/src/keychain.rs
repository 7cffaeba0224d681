//! One-way hash chain for delayed key disclosure.
//!
//! The chain is anchored by a secret seed and a session-random length `n`.
//! `derive_key(seed, n, i)` applies the one-way step `i` times; the
//! commitment is the key at index `n`. The disclosed key after `m` elapsed
//! timeslots sits at index `n - m`, so a verifier holding the commitment
//! checks it with exactly `m` further applications.
//!
//! # Security
//!
//! - One-wayness: the step is a truncated SHA-256. Walking toward the
//!   commitment is trivial, but a disclosed key at index `i` cannot
//!   produce any key below `i` — exactly the keys still undisclosed
//! - Finiteness: indices are bounded by the chain length; the chain refuses
//!   to advance past its last usable slot
//! - The commitment must reach verifiers before the first key is disclosed
//!   (the session layer owns that handshake)

use sha2::{Digest, Sha256};

use crate::{error::KeyChainError, seed::Seed};

/// Width in bytes of every chain key, including the commitment.
pub const CHAIN_KEY_SIZE: usize = 16;

/// A single key from the one-way chain.
///
/// Chain keys are public once disclosed; equality and hex display are
/// provided for verification and logging.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ChainKey([u8; CHAIN_KEY_SIZE]);

impl ChainKey {
    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CHAIN_KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for ChainKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainKey({})", hex::encode(self.0))
    }
}

impl std::fmt::Display for ChainKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// One application of the one-way step: SHA-256 truncated to the key width.
fn step(input: &[u8]) -> ChainKey {
    let digest = Sha256::digest(input);
    let mut key = [0u8; CHAIN_KEY_SIZE];
    key.copy_from_slice(&digest[..CHAIN_KEY_SIZE]);
    ChainKey(key)
}

/// Iterate the step `count - 1` more times after an initial application.
///
/// Caller guarantees `count >= 1`.
fn iterate(seed: &Seed, count: u32) -> ChainKey {
    let mut key = step(seed.as_bytes());
    for _ in 1..count {
        key = step(key.as_bytes());
    }
    key
}

/// Derive the chain key at `index`.
///
/// The key at index `i` is `i` applications of the one-way step to the
/// seed. Valid indices are `1..=chain_length`; index 0 would be the raw
/// seed and is never a chain key.
///
/// # Errors
///
/// - [`KeyChainError::InvalidChainLength`] if `chain_length` is zero
/// - [`KeyChainError::IndexOutOfRange`] if `index` is zero or exceeds the
///   chain length
pub fn derive_key(seed: &Seed, chain_length: u32, index: u32) -> Result<ChainKey, KeyChainError> {
    if chain_length == 0 {
        return Err(KeyChainError::InvalidChainLength(chain_length));
    }
    if index == 0 || index > chain_length {
        return Err(KeyChainError::IndexOutOfRange { index, chain_length });
    }
    Ok(iterate(seed, index))
}

/// Derive the chain commitment: the key at index `chain_length`.
///
/// The commitment is published to verifiers ahead of any disclosure.
///
/// # Errors
///
/// - [`KeyChainError::InvalidChainLength`] if `chain_length` is zero
pub fn derive_commitment(seed: &Seed, chain_length: u32) -> Result<ChainKey, KeyChainError> {
    derive_key(seed, chain_length, chain_length)
}

/// Verify a disclosed key against a commitment.
///
/// Applies the one-way step `steps_elapsed` more times to `key` and
/// compares the result with `expected_commitment`. Returns `false` on
/// mismatch; a mismatch is a fatal integrity signal for the caller, not an
/// error here.
#[must_use]
pub fn verify(key: &ChainKey, steps_elapsed: u32, expected_commitment: &ChainKey) -> bool {
    let mut current = *key;
    for _ in 0..steps_elapsed {
        current = step(current.as_bytes());
    }
    current == *expected_commitment
}

/// Stateful one-way chain for a single transmission session.
///
/// Owns the seed, the session chain length `n`, and a monotonically
/// decreasing `current_index` that starts at `n` and loses one per elapsed
/// AIS timeslot.
///
/// # Invariants
///
/// - `1 <= current_index <= chain_length` at all times
/// - `current_key()` equals `derive_key(seed, n, current_index)`
/// - `verify(current_key(), elapsed_slots(), commitment())` always holds
pub struct KeyChain {
    seed: Seed,
    chain_length: u32,
    current_index: u32,
    commitment: ChainKey,
}

impl KeyChain {
    /// Create a chain of length `chain_length` over `seed`, computing the
    /// commitment up front.
    ///
    /// # Errors
    ///
    /// - [`KeyChainError::InvalidChainLength`] if `chain_length` is zero
    pub fn new(seed: Seed, chain_length: u32) -> Result<Self, KeyChainError> {
        let commitment = derive_commitment(&seed, chain_length)?;
        Ok(Self { seed, chain_length, current_index: chain_length, commitment })
    }

    /// The commitment verifiers must hold before any disclosure.
    #[must_use]
    pub fn commitment(&self) -> ChainKey {
        self.commitment
    }

    /// Session chain length `n`.
    #[must_use]
    pub fn chain_length(&self) -> u32 {
        self.chain_length
    }

    /// Current chain index (starts at `n`, decremented per slot).
    #[must_use]
    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    /// Timeslots consumed so far.
    #[must_use]
    pub fn elapsed_slots(&self) -> u32 {
        self.chain_length - self.current_index
    }

    /// Consume one AIS timeslot, moving the disclosable key one step back
    /// along the chain.
    ///
    /// # Errors
    ///
    /// - [`KeyChainError::ChainExhausted`] once the last usable slot has
    ///   been consumed
    pub fn advance_slot(&mut self) -> Result<(), KeyChainError> {
        if self.current_index <= 1 {
            return Err(KeyChainError::ChainExhausted {
                elapsed: self.elapsed_slots(),
                chain_length: self.chain_length,
            });
        }
        self.current_index -= 1;
        Ok(())
    }

    /// Key disclosable at the current index.
    #[must_use]
    pub fn current_key(&self) -> ChainKey {
        // Invariant: 1 <= current_index <= chain_length
        iterate(&self.seed, self.current_index)
    }

    /// Sender-side integrity check: the current key must reach the
    /// commitment in exactly `elapsed_slots()` steps.
    #[must_use]
    pub fn self_verify(&self) -> bool {
        verify(&self.current_key(), self.elapsed_slots(), &self.commitment)
    }
}

impl std::fmt::Debug for KeyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyChain")
            .field("chain_length", &self.chain_length)
            .field("current_index", &self.current_index)
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn test_seed() -> Seed {
        let mut bytes = [0u8; crate::seed::SEED_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Seed::new(bytes)
    }

    #[test]
    fn derive_is_deterministic() {
        let k1 = derive_key(&test_seed(), 20, 7).unwrap();
        let k2 = derive_key(&test_seed(), 20, 7).unwrap();
        assert_eq!(k1, k2, "same inputs must produce same key");
    }

    #[test]
    fn adjacent_indices_are_one_step_apart() {
        let seed = test_seed();
        for index in 1..10 {
            let lower = derive_key(&seed, 10, index).unwrap();
            let upper = derive_key(&seed, 10, index + 1).unwrap();
            assert!(verify(&lower, 1, &upper), "index {index} must step to index {}", index + 1);
        }
    }

    #[test]
    fn commitment_is_key_at_chain_length() {
        let seed = test_seed();
        let commitment = derive_commitment(&seed, 25).unwrap();
        let last = derive_key(&seed, 25, 25).unwrap();
        assert_eq!(commitment, last);
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let seed = test_seed();
        let commitment = derive_commitment(&seed, 12).unwrap();
        let wrong = derive_key(&seed, 12, 4).unwrap();
        // 4 + 7 != 12, so seven more steps cannot reach the commitment
        assert!(!verify(&wrong, 7, &commitment));
    }

    #[test]
    fn verify_rejects_foreign_seed() {
        let commitment = derive_commitment(&test_seed(), 12).unwrap();
        let foreign = derive_key(&Seed::new([0xAB; crate::seed::SEED_SIZE]), 12, 4).unwrap();
        assert!(!verify(&foreign, 8, &commitment));
    }

    #[test]
    fn rejects_zero_chain_length() {
        assert_eq!(
            derive_commitment(&test_seed(), 0),
            Err(KeyChainError::InvalidChainLength(0))
        );
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(
            derive_key(&test_seed(), 5, 6),
            Err(KeyChainError::IndexOutOfRange { index: 6, chain_length: 5 })
        );
        assert_eq!(
            derive_key(&test_seed(), 5, 0),
            Err(KeyChainError::IndexOutOfRange { index: 0, chain_length: 5 })
        );
    }

    #[test]
    fn chain_starts_at_full_length() {
        let chain = KeyChain::new(test_seed(), 40).unwrap();
        assert_eq!(chain.current_index(), 40);
        assert_eq!(chain.elapsed_slots(), 0);
    }

    #[test]
    fn advance_decrements_index() {
        let mut chain = KeyChain::new(test_seed(), 40).unwrap();
        chain.advance_slot().unwrap();
        chain.advance_slot().unwrap();
        assert_eq!(chain.current_index(), 38);
        assert_eq!(chain.elapsed_slots(), 2);
    }

    #[test]
    fn advance_refuses_to_exhaust_chain() {
        let mut chain = KeyChain::new(test_seed(), 3).unwrap();
        chain.advance_slot().unwrap();
        chain.advance_slot().unwrap();
        assert_eq!(
            chain.advance_slot(),
            Err(KeyChainError::ChainExhausted { elapsed: 2, chain_length: 3 })
        );
    }

    #[test]
    fn self_verify_holds_after_every_slot() {
        let mut chain = KeyChain::new(test_seed(), 12).unwrap();
        assert!(chain.self_verify());
        for _ in 0..9 {
            chain.advance_slot().unwrap();
            assert!(chain.self_verify());
        }
    }

    #[test]
    fn disclosed_key_verifies_against_commitment() {
        let mut chain = KeyChain::new(test_seed(), 30).unwrap();
        for _ in 0..5 {
            chain.advance_slot().unwrap();
        }
        let disclosed = chain.current_key();
        assert!(verify(&disclosed, 5, &chain.commitment()));
    }

    proptest! {
        // Composition law: the key at index i reaches the key at index
        // i + j in exactly j applications of the step.
        #[test]
        fn chain_composition_law(i in 1u32..40, j in 0u32..40) {
            let n = 80;
            let seed = test_seed();
            let at_i = derive_key(&seed, n, i).unwrap();
            let at_i_plus_j = derive_key(&seed, n, i + j).unwrap();
            prop_assert!(verify(&at_i, j, &at_i_plus_j));
        }

        // Self-verification: a key disclosed after e slots reaches the
        // commitment in exactly e steps.
        #[test]
        fn self_verification_always_true(n in 2u32..60, e_raw in 0u32..60) {
            let e = e_raw % n;
            let seed = test_seed();
            let commitment = derive_commitment(&seed, n).unwrap();
            let disclosed = derive_key(&seed, n, n - e).unwrap();
            prop_assert!(verify(&disclosed, e, &commitment));
        }
    }
}
