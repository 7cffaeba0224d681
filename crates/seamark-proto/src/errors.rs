//! Error types for the Seamark wire format.
//!
//! Configuration errors (unsupported level) are distinguished from
//! assembly errors (field or payload violations) so the caller can abort
//! before any session state exists in the first case.

use thiserror::Error;

use crate::level::SecurityLevel;

/// Errors from level lookup and payload assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Raw security level outside the supported closed set
    #[error("security level {0} not supported (valid levels are 0-6)")]
    UnsupportedLevel(u8),

    /// Value does not fit the fixed-width field
    #[error("value {value} does not fit in a {width}-bit field")]
    FieldOverflow {
        /// Value that was pushed
        value: u64,
        /// Width of the destination field in bits
        width: usize,
    },

    /// Authentication material has the wrong length for the level profile
    #[error("{field} is {actual} bytes, level profile requires {expected}")]
    FieldLengthMismatch {
        /// Name of the offending field
        field: &'static str,
        /// Length the profile requires in bytes
        expected: usize,
        /// Length that was supplied in bytes
        actual: usize,
    },

    /// Filter bits supplied for a level that does not transmit a filter
    #[error("level {level} does not carry a filter, but filter bits were supplied")]
    UnexpectedFilter {
        /// Level the payload was assembled for
        level: SecurityLevel,
    },

    /// Filter bits missing for a level that requires them
    #[error("level {level} requires a filter of {expected_bits} bits")]
    MissingFilter {
        /// Level the payload was assembled for
        level: SecurityLevel,
        /// Filter length the level's budget dictates
        expected_bits: usize,
    },

    /// Serialized filter length does not match the level's byte budget
    #[error("filter is {actual_bits} bits, level {level} budgets {expected_bits}")]
    FilterSizeMismatch {
        /// Level the payload was assembled for
        level: SecurityLevel,
        /// Filter length the level's budget dictates in bits
        expected_bits: usize,
        /// Filter length that was supplied in bits
        actual_bits: usize,
    },

    /// Assembled payload exceeds the slot group capacity
    #[error("payload is {bits} bits, slot group capacity is {max_bits}")]
    PayloadTooLarge {
        /// Assembled payload length in bits
        bits: usize,
        /// Capacity of one slot group in bits
        max_bits: usize,
    },
}
