//! Error types for the protocol session.
//!
//! The taxonomy mirrors the failure modes of the protocol: configuration
//! errors abort before any session state exists, transport failures abort
//! the current step with no retry, and a self-verification mismatch is an
//! implementation-defect signal, fatal for the session.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can end a transmission session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration or payload assembly violated the wire format
    #[error("configuration error: {0}")]
    Configuration(#[from] seamark_proto::ProtocolError),

    /// Transport open/send failed; terminal, no retry
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Key chain construction or advancement failed
    #[error("key chain error: {0}")]
    KeyChain(#[from] seamark_crypto::KeyChainError),

    /// Authentication tag computation failed
    #[error("authentication tag error: {0}")]
    Tag(#[from] seamark_crypto::TagError),

    /// Sender-side chain verification mismatch; the derivation and the
    /// commitment disagree, which signals an implementation defect
    #[error(
        "key chain self-verification failed after {elapsed} slots (chain length {chain_length})"
    )]
    KeyChainIntegrity {
        /// Slots elapsed when the check ran
        elapsed: u32,
        /// Session chain length
        chain_length: u32,
    },
}
