//! Master seed material and its providers.
//!
//! The chain seed either comes from a passphrase through PBKDF2 or is
//! supplied directly for deterministic deployments and tests. Which variant
//! is used is a configuration decision, never a compiled-in constant.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroize;

/// Width in bytes of the master seed.
pub const SEED_SIZE: usize = 32;

/// PBKDF2 iteration count used when none is configured.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 1000;

/// Salt used when none is configured.
pub const DEFAULT_SALT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Secret master seed anchoring a session's one-way chain.
///
/// Zeroized on drop. The seed never leaves the crypto layer; only derived
/// chain keys are disclosed.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Wrap raw seed bytes.
    #[must_use]
    pub fn new(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw seed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print seed material
        f.write_str("Seed(..)")
    }
}

/// Source of the master seed, selected by configuration.
#[derive(Clone)]
pub enum SeedProvider {
    /// Derive the seed from a passphrase with PBKDF2-HMAC-SHA512.
    Passphrase {
        /// Operator passphrase
        passphrase: String,
        /// Salt mixed into the derivation
        salt: Vec<u8>,
        /// PBKDF2 iteration count
        iterations: u32,
    },

    /// Use a fixed seed (deterministic deployments and tests).
    Fixed(Seed),
}

impl SeedProvider {
    /// Passphrase provider with the default salt and iteration count.
    #[must_use]
    pub fn passphrase(passphrase: impl Into<String>) -> Self {
        Self::Passphrase {
            passphrase: passphrase.into(),
            salt: DEFAULT_SALT.to_vec(),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }

    /// Produce the master seed.
    #[must_use]
    pub fn derive(&self) -> Seed {
        match self {
            Self::Passphrase { passphrase, salt, iterations } => {
                let mut out = [0u8; SEED_SIZE];
                pbkdf2_hmac::<Sha512>(passphrase.as_bytes(), salt, *iterations, &mut out);
                Seed::new(out)
            },
            Self::Fixed(seed) => seed.clone(),
        }
    }
}

impl std::fmt::Debug for SeedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passphrase { salt, iterations, .. } => f
                .debug_struct("SeedProvider::Passphrase")
                .field("salt_len", &salt.len())
                .field("iterations", iterations)
                .finish_non_exhaustive(),
            Self::Fixed(_) => f.write_str("SeedProvider::Fixed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passphrase_derivation_is_deterministic() {
        let provider = SeedProvider::passphrase("M0ng00se");
        assert_eq!(provider.derive(), provider.derive());
    }

    #[test]
    fn different_passphrases_produce_different_seeds() {
        let a = SeedProvider::passphrase("M0ng00se").derive();
        let b = SeedProvider::passphrase("Mongoose").derive();
        assert_ne!(a, b);
    }

    #[test]
    fn different_salts_produce_different_seeds() {
        let a = SeedProvider::Passphrase {
            passphrase: "M0ng00se".to_string(),
            salt: vec![1; 8],
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
        .derive();
        let b = SeedProvider::passphrase("M0ng00se").derive();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_provider_returns_its_seed() {
        let seed = Seed::new([0x42; SEED_SIZE]);
        assert_eq!(SeedProvider::Fixed(seed.clone()).derive(), seed);
    }

    #[test]
    fn debug_output_hides_material() {
        let rendered = format!("{:?}", SeedProvider::passphrase("secret"));
        assert!(!rendered.contains("secret"));
        assert_eq!(format!("{:?}", Seed::new([7; SEED_SIZE])), "Seed(..)");
    }
}
