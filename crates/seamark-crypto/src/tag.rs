//! Truncated keyed-MAC authentication tag.
//!
//! The tag is an HMAC over the session transcript (the wire bytes of every
//! carrier frame sent this session), keyed with the disclosed chain key and
//! truncated to the security level's output digest size.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::TagError;

/// Underlying digest of the keyed MAC.
///
/// Every shipped security level selects [`DigestAlgorithm::Sha512`]; the
/// shorter variants remain selectable for future profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// HMAC-SHA-256 (32-byte output)
    Sha256,
    /// HMAC-SHA-384 (48-byte output)
    Sha384,
    /// HMAC-SHA-512 (64-byte output)
    Sha512,
}

impl DigestAlgorithm {
    /// Output size of the digest in bytes.
    #[must_use]
    pub fn output_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// Compute the authentication tag over `transcript`, truncated to
/// `output_len` bytes.
///
/// # Errors
///
/// - [`TagError::TruncationTooLong`] if `output_len` exceeds the digest's
///   output size
pub fn authentication_tag(
    algorithm: DigestAlgorithm,
    key: &[u8],
    transcript: &[u8],
    output_len: usize,
) -> Result<Vec<u8>, TagError> {
    if output_len > algorithm.output_size() {
        return Err(TagError::TruncationTooLong {
            requested: output_len,
            digest_output: algorithm.output_size(),
        });
    }

    let mut full = match algorithm {
        DigestAlgorithm::Sha256 => {
            let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(key) else {
                unreachable!("HMAC-SHA256 accepts any key size");
            };
            mac.update(transcript);
            mac.finalize().into_bytes().to_vec()
        },
        DigestAlgorithm::Sha384 => {
            let Ok(mut mac) = Hmac::<Sha384>::new_from_slice(key) else {
                unreachable!("HMAC-SHA384 accepts any key size");
            };
            mac.update(transcript);
            mac.finalize().into_bytes().to_vec()
        },
        DigestAlgorithm::Sha512 => {
            let Ok(mut mac) = Hmac::<Sha512>::new_from_slice(key) else {
                unreachable!("HMAC-SHA512 accepts any key size");
            };
            mac.update(transcript);
            mac.finalize().into_bytes().to_vec()
        },
    };

    full.truncate(output_len);
    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef";

    #[test]
    fn tag_is_deterministic() {
        let a = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", 49).unwrap();
        let b = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", 49).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tag_has_requested_length() {
        for len in [20, 21, 32, 49] {
            let tag = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", len).unwrap();
            assert_eq!(tag.len(), len);
        }
    }

    #[test]
    fn truncation_is_a_prefix() {
        let long = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", 64).unwrap();
        let short = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", 20).unwrap();
        assert_eq!(&long[..20], &short[..]);
    }

    #[test]
    fn different_keys_produce_different_tags() {
        let a = authentication_tag(DigestAlgorithm::Sha512, KEY, b"transcript", 32).unwrap();
        let b =
            authentication_tag(DigestAlgorithm::Sha512, b"another-key-here", b"transcript", 32)
                .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_transcripts_produce_different_tags() {
        let a = authentication_tag(DigestAlgorithm::Sha512, KEY, b"frame one", 32).unwrap();
        let b = authentication_tag(DigestAlgorithm::Sha512, KEY, b"frame two", 32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_truncation_beyond_digest() {
        assert_eq!(
            authentication_tag(DigestAlgorithm::Sha256, KEY, b"transcript", 33),
            Err(TagError::TruncationTooLong { requested: 33, digest_output: 32 })
        );
    }

    #[test]
    fn digest_output_sizes() {
        assert_eq!(DigestAlgorithm::Sha256.output_size(), 32);
        assert_eq!(DigestAlgorithm::Sha384.output_size(), 48);
        assert_eq!(DigestAlgorithm::Sha512.output_size(), 64);
    }
}
