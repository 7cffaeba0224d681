//! Bloom accumulator for transmitted carrier frames.
//!
//! A session-scoped probabilistic digest of every carrier frame sent so
//! far, sized once from the security level's byte budget. Bits are only
//! ever set, never cleared; the serialized form has a fixed length
//! because the downstream payload packer assumes fixed-width fields.
//!
//! # Invariants
//!
//! - No false negatives: once `add(x)` has run, `contains(x)` stays true
//!   for the rest of the session
//! - `serialize()` is always exactly `byte_budget * 8` bits, regardless
//!   of fill ratio
//! - Byte budget and hash count are fixed at construction

use std::io::Cursor;

use bitvec::prelude::{BitSlice, BitVec, Msb0};

/// Session-scoped Bloom filter over carrier frame bytes.
#[derive(Debug, Clone)]
pub struct BloomAccumulator {
    bits: BitVec<u8, Msb0>,
    hash_count: usize,
    inserted: usize,
}

impl BloomAccumulator {
    /// Size a filter for `byte_budget` bytes and `expected_items`
    /// insertions.
    ///
    /// The hash count follows the fixed-budget heuristic
    /// `k = max(1, floor(ln 2 * z / m))`. With `expected_items == 0`
    /// nothing will ever be inserted and the array simply stays all
    /// zero.
    #[must_use]
    pub fn new(byte_budget: usize, expected_items: usize) -> Self {
        let hash_count = if expected_items == 0 {
            1
        } else {
            let optimal =
                (std::f64::consts::LN_2 * byte_budget as f64 / expected_items as f64) as usize;
            optimal.max(1)
        };
        Self { bits: BitVec::repeat(false, byte_budget * 8), hash_count, inserted: 0 }
    }

    /// Fold an item into the filter.
    ///
    /// Idempotent: re-adding an item sets bits that are already set.
    pub fn add(&mut self, item: &[u8]) {
        if self.bits.is_empty() {
            return;
        }
        for position in self.positions(item) {
            self.bits.set(position, true);
        }
        self.inserted += 1;
    }

    /// Whether the item might have been added.
    ///
    /// `true` can be a false positive; `false` is definitive.
    #[must_use]
    pub fn contains(&self, item: &[u8]) -> bool {
        if self.bits.is_empty() {
            return false;
        }
        self.positions(item).into_iter().all(|position| self.bits[position])
    }

    /// Fixed-length bit image of the filter: exactly `byte_budget * 8`
    /// bits, whatever the fill ratio.
    #[must_use]
    pub fn serialize(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Filter length in bits.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash positions per item.
    #[must_use]
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Items folded in so far (monotonic, no deletion).
    #[must_use]
    pub fn inserted_count(&self) -> usize {
        self.inserted
    }

    /// Fraction of set bits, for diagnostics.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Double-hashed bit positions for an item: `h1 + i * h2 mod len`.
    fn positions(&self, item: &[u8]) -> Vec<usize> {
        let h1 = murmur_hash(item, 0);
        let h2 = murmur_hash(item, 1);
        let len = self.bits.len() as u64;
        (0..self.hash_count)
            .map(|i| (h1.wrapping_add((i as u64).wrapping_mul(h2)) % len) as usize)
            .collect()
    }
}

/// MurmurHash3 x64 128, folded to the lower 64 bits.
fn murmur_hash(item: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(item);
    murmur3::murmur3_x64_128(&mut cursor, seed).map_or(0, |hash| hash as u64)
}
