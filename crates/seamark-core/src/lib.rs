//! Seamark Protocol Core
//!
//! The stateful heart of the Seamark broadcast authentication sender: one
//! [`ProtocolSession`] per transmission, owning a one-way key chain and
//! (at filter-bearing levels) a [`BloomAccumulator`], driving carrier
//! frames and authentication material through a [`Transport`]
//! collaborator.
//!
//! # Session Flow
//!
//! ```text
//! Init ─▶ SendCarrier (×count) ─▶ DeriveKey ─▶ ComputeTag
//!            │                                     │
//!            ▼                                     ▼
//!     Bloom add + transcript          EncodePayload ─▶ Transmit
//!                                                         │
//!                                                         ▼
//!                                      SelfVerify ─▶ Done | Failed
//! ```
//!
//! Everything is synchronous and single threaded; every transport call
//! blocks, a failure aborts the session immediately, and no state is
//! shared across sessions.
//!
//! # Security
//!
//! - The chain commitment must reach verifiers before the first key is
//!   disclosed: callers obtain it via
//!   [`ProtocolSession::announcement`] and distribute it out of band
//!   before calling [`ProtocolSession::run`]
//! - Sender-side self-verification catches inconsistent chain arithmetic
//!   before the session reports success; a mismatch is fatal, not
//!   retryable

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod session;
pub mod transport;

pub use bloom::BloomAccumulator;
pub use error::SessionError;
pub use session::{
    CommitmentAnnouncement, ProtocolSession, SessionConfig, SessionPhase, SessionReport,
};
pub use transport::{RenderedFrame, Transport, TransportError};
