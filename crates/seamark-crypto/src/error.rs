//! Error types for the Seamark cryptographic primitives.
//!
//! Strongly-typed errors per primitive: chain derivation errors (invalid
//! parameters, exhausted chain) and tag errors (impossible truncation).
//! Failed verification is a `bool`, not an error, because a mismatch is a
//! protocol-level signal the caller must decide on.

use thiserror::Error;

/// Errors from one-way hash chain construction and derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyChainError {
    /// Chain length must allow at least one application of the step
    #[error("chain length must be at least 1, got {0}")]
    InvalidChainLength(u32),

    /// Requested index lies outside the chain
    #[error("chain index {index} out of range for chain of length {chain_length}")]
    IndexOutOfRange {
        /// Index that was requested (valid range is `1..=chain_length`)
        index: u32,
        /// Length of the chain the index was requested from
        chain_length: u32,
    },

    /// Every usable slot of the chain has been consumed
    #[error("key chain exhausted after {elapsed} slots (chain length {chain_length})")]
    ChainExhausted {
        /// Slots consumed so far
        elapsed: u32,
        /// Length of the exhausted chain
        chain_length: u32,
    },
}

/// Errors from authentication tag computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// Requested tag length exceeds what the digest can provide
    #[error("cannot truncate {digest_output}-byte digest to {requested} bytes")]
    TruncationTooLong {
        /// Requested truncated length in bytes
        requested: usize,
        /// Output size of the selected digest in bytes
        digest_output: usize,
    },
}
