//! Security levels and the slot budget policy.
//!
//! Each level fixes which authentication mechanisms are transmitted and how
//! the slot group's byte budget is divided between the MAC tag, the
//! disclosed chain key, and the Bloom filter digest. The table is a closed
//! enum so that adding or auditing a level is a compile-time-checked
//! operation; unsupported raw values are a configuration error at the
//! boundary, never a silent default.

use seamark_crypto::{CHAIN_KEY_SIZE, DigestAlgorithm};

use crate::errors::ProtocolError;

/// Maximum payload bytes per transmitted slot group (3 AIS slots).
pub const SLOT_CAPACITY: usize = 66;

/// Bytes reserved for the level-id and application-meta bits.
pub const META_FIELD_SIZE: usize = 1;

/// Width of the level-id field in bits.
pub const LEVEL_FIELD_BITS: usize = 3;

/// Width of the application-meta field in bits.
pub const META_FIELD_BITS: usize = 5;

/// Meta value marking the standalone filter frame at split levels.
pub const FILTER_FRAME_META: u8 = 1;

/// Digest sizes and carrier count fixed by a security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    /// Digest underlying the keyed MAC
    pub input_digest: DigestAlgorithm,
    /// Truncated MAC tag length in bytes
    pub output_digest_size: usize,
    /// Carrier position reports sent before the authenticated frame
    pub carrier_message_count: usize,
}

/// Closed set of supported security levels.
///
/// Mechanisms per level:
///
/// | level | chain key + tag | filter    | frames |
/// |-------|-----------------|-----------|--------|
/// | 0     | no              | no        | 1      |
/// | 1, 2  | yes             | no        | 1      |
/// | 3, 4  | yes             | combined  | 1      |
/// | 5, 6  | yes             | standalone| 2      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// Meta frame only, no authentication material
    Level0,
    /// Chain key + 49-byte tag
    Level1,
    /// Chain key + 21-byte tag
    Level2,
    /// Chain key + 32-byte tag + filter, one frame
    Level3,
    /// Chain key + 20-byte tag + filter, one frame
    Level4,
    /// Chain key + 20-byte tag; filter in its own frame
    Level5,
    /// Chain key + 49-byte tag; filter in its own frame
    Level6,
}

/// All supported levels, in id order.
pub const ALL_LEVELS: [SecurityLevel; 7] = [
    SecurityLevel::Level0,
    SecurityLevel::Level1,
    SecurityLevel::Level2,
    SecurityLevel::Level3,
    SecurityLevel::Level4,
    SecurityLevel::Level5,
    SecurityLevel::Level6,
];

impl SecurityLevel {
    /// Numeric level id as transmitted in the 3-bit wire field.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
            Self::Level5 => 5,
            Self::Level6 => 6,
        }
    }

    /// Digest sizes and carrier count for this level.
    #[must_use]
    pub const fn profile(self) -> LevelProfile {
        match self {
            Self::Level0 | Self::Level1 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 49,
                carrier_message_count: 1,
            },
            Self::Level2 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 21,
                carrier_message_count: 1,
            },
            Self::Level3 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 32,
                carrier_message_count: 2,
            },
            Self::Level4 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 20,
                carrier_message_count: 4,
            },
            Self::Level5 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 20,
                carrier_message_count: 9,
            },
            Self::Level6 => LevelProfile {
                input_digest: DigestAlgorithm::Sha512,
                output_digest_size: 49,
                carrier_message_count: 9,
            },
        }
    }

    /// Whether carrier frames are folded into a Bloom filter.
    #[must_use]
    pub const fn uses_filter(self) -> bool {
        matches!(self, Self::Level3 | Self::Level4 | Self::Level5 | Self::Level6)
    }

    /// Whether the filter travels in its own frame instead of sharing the
    /// authenticated frame.
    #[must_use]
    pub const fn separate_filter_frame(self) -> bool {
        matches!(self, Self::Level5 | Self::Level6)
    }

    /// Byte budget left for the Bloom filter digest.
    ///
    /// When the filter shares the frame it competes with the tag, the
    /// disclosed key, and the meta byte; in its own frame only the meta
    /// byte is reserved.
    #[must_use]
    pub const fn bloom_byte_budget(self) -> usize {
        if self.separate_filter_frame() {
            SLOT_CAPACITY - META_FIELD_SIZE
        } else {
            SLOT_CAPACITY - (self.profile().output_digest_size + CHAIN_KEY_SIZE + META_FIELD_SIZE)
        }
    }
}

// Every level's key + tag + meta reservation must fit one slot group; the
// closed enum makes this checkable when the table is edited.
const _: () = {
    let mut i = 0;
    while i < ALL_LEVELS.len() {
        let reserved =
            ALL_LEVELS[i].profile().output_digest_size + CHAIN_KEY_SIZE + META_FIELD_SIZE;
        assert!(reserved <= SLOT_CAPACITY, "level reservation overflows the slot group");
        i += 1;
    }
};

impl TryFrom<u8> for SecurityLevel {
    type Error = ProtocolError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Level0),
            1 => Ok(Self::Level1),
            2 => Ok(Self::Level2),
            3 => Ok(Self::Level3),
            4 => Ok(Self::Level4),
            5 => Ok(Self::Level5),
            6 => Ok(Self::Level6),
            other => Err(ProtocolError::UnsupportedLevel(other)),
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
