//! Per-level assembly of the authenticated payload.
//!
//! The payload branches strictly on the security level: level 0 sends the
//! meta block alone, levels 1-2 add the disclosed chain key and the tag,
//! levels 3-4 append the filter to the same frame, and levels 5-6 move the
//! filter into a second frame whose meta value marks it as the filter
//! carrier. Every assembled payload is checked against the slot group
//! capacity before it leaves this module.

use bitvec::prelude::{BitSlice, Msb0};
use seamark_crypto::ChainKey;

use crate::{
    bits::BitString,
    errors::ProtocolError,
    level::{FILTER_FRAME_META, LEVEL_FIELD_BITS, META_FIELD_BITS, SLOT_CAPACITY, SecurityLevel},
};

/// Assemble the authenticated payload(s) for `level`.
///
/// Returns one payload for levels 0-4 and two for levels 5-6 (key + tag
/// first, filter second). The filter argument must be present exactly when
/// the level transmits one, and must match the level's byte budget.
///
/// # Errors
///
/// - [`ProtocolError::FieldLengthMismatch`] if the tag length differs from
///   the level's output digest size
/// - [`ProtocolError::UnexpectedFilter`] / [`ProtocolError::MissingFilter`]
///   if the filter argument contradicts the level
/// - [`ProtocolError::FilterSizeMismatch`] if the filter length differs
///   from the level's budget
/// - [`ProtocolError::PayloadTooLarge`] if an assembled payload exceeds
///   the slot group capacity
pub fn encode_auth_payloads(
    level: SecurityLevel,
    key: &ChainKey,
    tag: &[u8],
    filter: Option<&BitSlice<u8, Msb0>>,
) -> Result<Vec<BitString>, ProtocolError> {
    let profile = level.profile();

    if level != SecurityLevel::Level0 && tag.len() != profile.output_digest_size {
        return Err(ProtocolError::FieldLengthMismatch {
            field: "authentication tag",
            expected: profile.output_digest_size,
            actual: tag.len(),
        });
    }

    let expected_filter_bits = level.bloom_byte_budget() * 8;
    let filter = match (level.uses_filter(), filter) {
        (false, None) => None,
        (false, Some(_)) => return Err(ProtocolError::UnexpectedFilter { level }),
        (true, None) => {
            return Err(ProtocolError::MissingFilter { level, expected_bits: expected_filter_bits });
        },
        (true, Some(bits)) => {
            if bits.len() != expected_filter_bits {
                return Err(ProtocolError::FilterSizeMismatch {
                    level,
                    expected_bits: expected_filter_bits,
                    actual_bits: bits.len(),
                });
            }
            Some(bits)
        },
    };

    let mut payloads = Vec::with_capacity(if level.separate_filter_frame() { 2 } else { 1 });

    match level {
        SecurityLevel::Level0 => {
            payloads.push(meta_block(level, 0)?);
        },
        SecurityLevel::Level1 | SecurityLevel::Level2 => {
            let mut payload = meta_block(level, 0)?;
            payload.push_bytes(key.as_bytes());
            payload.push_bytes(tag);
            payloads.push(payload);
        },
        SecurityLevel::Level3 | SecurityLevel::Level4 => {
            let mut payload = meta_block(level, 0)?;
            payload.push_bytes(key.as_bytes());
            payload.push_bytes(tag);
            if let Some(bits) = filter {
                payload.extend_bits(bits);
            }
            payloads.push(payload);
        },
        SecurityLevel::Level5 | SecurityLevel::Level6 => {
            let mut disclosure = meta_block(level, 0)?;
            disclosure.push_bytes(key.as_bytes());
            disclosure.push_bytes(tag);
            payloads.push(disclosure);

            let mut filter_frame = meta_block(level, FILTER_FRAME_META)?;
            if let Some(bits) = filter {
                filter_frame.extend_bits(bits);
            }
            payloads.push(filter_frame);
        },
    }

    for payload in &payloads {
        if payload.len() > SLOT_CAPACITY * 8 {
            return Err(ProtocolError::PayloadTooLarge {
                bits: payload.len(),
                max_bits: SLOT_CAPACITY * 8,
            });
        }
    }

    Ok(payloads)
}

/// Level-id and application-meta bits opening every authenticated payload.
fn meta_block(level: SecurityLevel, meta: u8) -> Result<BitString, ProtocolError> {
    let mut bits = BitString::new();
    bits.push_uint(u64::from(level.id()), LEVEL_FIELD_BITS)?;
    bits.push_uint(u64::from(meta), META_FIELD_BITS)?;
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use seamark_crypto::{CHAIN_KEY_SIZE, Seed, derive_key};

    use super::*;

    fn test_key() -> ChainKey {
        let seed = Seed::new([7u8; 32]);
        derive_key(&seed, 10, 5).unwrap()
    }

    fn filter_bits(bytes: usize) -> BitString {
        let mut bits = BitString::new();
        bits.push_bytes(&vec![0u8; bytes]);
        bits
    }

    #[test]
    fn level_0_is_meta_block_only() {
        let payloads =
            encode_auth_payloads(SecurityLevel::Level0, &test_key(), &[], None).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].len(), 8, "3 level bits + 5 meta bits");
        assert_eq!(payloads[0].render(), "00000000");
    }

    #[test]
    fn level_1_carries_key_and_tag() {
        let tag = vec![0xCD; 49];
        let payloads =
            encode_auth_payloads(SecurityLevel::Level1, &test_key(), &tag, None).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].len(), 8 + CHAIN_KEY_SIZE * 8 + 49 * 8);
        assert_eq!(&payloads[0].render()[..3], "001");
    }

    #[test]
    fn level_3_appends_filter_to_same_frame() {
        let tag = vec![0xCD; 32];
        let budget = SecurityLevel::Level3.bloom_byte_budget();
        let filter = filter_bits(budget);
        let payloads =
            encode_auth_payloads(SecurityLevel::Level3, &test_key(), &tag, Some(filter.as_bits()))
                .unwrap();
        assert_eq!(payloads.len(), 1);
        // Exactly one full slot group: meta + key + tag + filter
        assert_eq!(payloads[0].len(), SLOT_CAPACITY * 8);
    }

    #[test]
    fn level_5_splits_filter_into_second_frame() {
        let tag = vec![0xCD; 20];
        let budget = SecurityLevel::Level5.bloom_byte_budget();
        let filter = filter_bits(budget);
        let payloads =
            encode_auth_payloads(SecurityLevel::Level5, &test_key(), &tag, Some(filter.as_bits()))
                .unwrap();
        assert_eq!(payloads.len(), 2);
        // Frame A: meta(0) + key + tag
        assert_eq!(payloads[0].len(), 8 + CHAIN_KEY_SIZE * 8 + 20 * 8);
        assert_eq!(&payloads[0].render()[3..8], "00000");
        // Frame B: meta(1) + filter, exactly one slot group
        assert_eq!(payloads[1].len(), SLOT_CAPACITY * 8);
        assert_eq!(&payloads[1].render()[3..8], "00001");
    }

    #[test]
    fn wrong_tag_length_is_rejected() {
        let err = encode_auth_payloads(SecurityLevel::Level2, &test_key(), &[0u8; 49], None)
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::FieldLengthMismatch {
                field: "authentication tag",
                expected: 21,
                actual: 49
            }
        );
    }

    #[test]
    fn filter_for_filterless_level_is_rejected() {
        let filter = filter_bits(4);
        let err = encode_auth_payloads(
            SecurityLevel::Level1,
            &test_key(),
            &[0u8; 49],
            Some(filter.as_bits()),
        )
        .unwrap_err();
        assert_eq!(err, ProtocolError::UnexpectedFilter { level: SecurityLevel::Level1 });
    }

    #[test]
    fn missing_filter_is_rejected() {
        let err = encode_auth_payloads(SecurityLevel::Level4, &test_key(), &[0u8; 20], None)
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::MissingFilter {
                level: SecurityLevel::Level4,
                expected_bits: SecurityLevel::Level4.bloom_byte_budget() * 8
            }
        );
    }

    #[test]
    fn wrong_filter_size_is_rejected() {
        let filter = filter_bits(3);
        let err = encode_auth_payloads(
            SecurityLevel::Level6,
            &test_key(),
            &[0u8; 49],
            Some(filter.as_bits()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::FilterSizeMismatch {
                level: SecurityLevel::Level6,
                expected_bits: 65 * 8,
                actual_bits: 3 * 8
            }
        );
    }

    #[test]
    fn every_level_fits_the_slot_group() {
        for level in crate::level::ALL_LEVELS {
            let profile = level.profile();
            let tag = vec![0u8; if level == SecurityLevel::Level0 {
                0
            } else {
                profile.output_digest_size
            }];
            let filter = filter_bits(level.bloom_byte_budget());
            let filter_arg = level.uses_filter().then(|| filter.as_bits());
            let payloads = encode_auth_payloads(level, &test_key(), &tag, filter_arg).unwrap();
            for payload in payloads {
                assert!(payload.len() <= SLOT_CAPACITY * 8);
            }
        }
    }
}
