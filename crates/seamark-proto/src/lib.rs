//! Seamark Wire Format
//!
//! Bit-exact encoding for the Seamark broadcast authentication sender: the
//! security-level table with its slot budget arithmetic, the bit-string
//! payload builder, and the AIS frame layouts (type 4 position reports as
//! carriers, type 8 binary broadcasts for authentication material).
//!
//! Frames travel as printable `'0'`/`'1'` characters, one character per
//! bit, because the downstream modem chain consumes rendered bit strings.
//! Every field is fixed width; payload lengths are bounded by the slot
//! capacity and checked at encode time.
//!
//! # Invariants
//!
//! - A rendered frame never exceeds [`SLOT_CAPACITY`] bytes of payload per
//!   slot group; oversized payloads are split into consecutive type 8
//!   frames, never truncated
//! - The security-level table is a closed enum: every level carries its
//!   digest sizes and carrier count, and unsupported raw values are
//!   rejected at the boundary
//! - Encoding is deterministic; the same inputs always produce the same
//!   bit string

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bits;
pub mod carrier;
pub mod errors;
pub mod level;
pub mod payload;
pub mod report;

pub use bits::BitString;
pub use carrier::PositionReport;
pub use errors::ProtocolError;
pub use level::{
    ALL_LEVELS, FILTER_FRAME_META, LEVEL_FIELD_BITS, LevelProfile, META_FIELD_BITS,
    META_FIELD_SIZE, SLOT_CAPACITY, SecurityLevel,
};
pub use payload::encode_auth_payloads;
pub use report::BinaryBroadcast;
