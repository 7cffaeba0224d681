//! Seamark Cryptographic Primitives
//!
//! Cryptographic building blocks for the Seamark broadcast authentication
//! sender. Pure functions with deterministic outputs. Callers provide the
//! chain length and seed material, which keeps every derivation reproducible
//! under test.
//!
//! # Key Lifecycle
//!
//! A session owns one one-way hash chain. The chain is anchored by a master
//! seed and a session-random chain length `n`; iterating the one-way step
//! `n` times over the seed yields the commitment, which verifiers must hold
//! before the first key is disclosed.
//!
//! ```text
//! Passphrase ──PBKDF2──▶ Seed
//!                          │
//!                          ▼
//! One-way chain: F(seed), F²(seed), …, Fⁿ(seed) = commitment
//!                          │
//!                          ▼
//! Disclosed key (after m slots) = Fⁿ⁻ᵐ(seed)
//!                          │
//!                          ▼
//! HMAC over carrier transcript → truncated authentication tag
//! ```
//!
//! # Security
//!
//! Delayed Disclosure:
//! - The chain step is strictly one-way: a disclosed key walks forward to
//!   the commitment for verification but never yields the keys still
//!   undisclosed
//! - A key revealed after `m` slots verifies against the commitment with
//!   exactly `m` further applications of the step
//! - The chain is finite: once `n` slots have elapsed the chain is exhausted
//!   and the session must end
//!
//! Seed Hygiene:
//! - The master seed is zeroized on drop
//! - Disclosed chain keys and the commitment are public values and carry no
//!   zeroing obligation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod keychain;
pub mod seed;
pub mod tag;

pub use error::{KeyChainError, TagError};
pub use keychain::{CHAIN_KEY_SIZE, ChainKey, KeyChain, derive_commitment, derive_key, verify};
pub use seed::{DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SALT, SEED_SIZE, Seed, SeedProvider};
pub use tag::{DigestAlgorithm, authentication_tag};
