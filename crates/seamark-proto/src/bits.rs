//! Fixed-width bit-string builder.
//!
//! AIS payloads are assembled most-significant-bit first from fixed-width
//! unsigned, two's-complement, and raw-byte fields, then rendered as
//! printable `'0'`/`'1'` characters for the modem chain.

use bitvec::prelude::{BitSlice, BitVec, Msb0};

use crate::errors::ProtocolError;

/// Growable bit sequence with fixed-width field pushes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    bits: BitVec<u8, Msb0>,
}

impl BitString {
    /// Empty bit string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty bit string with capacity for `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self { bits: BitVec::with_capacity(bits) }
    }

    /// Append an unsigned value as a `width`-bit big-endian field.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FieldOverflow`] if `value` does not fit `width`
    ///   bits
    pub fn push_uint(&mut self, value: u64, width: usize) -> Result<(), ProtocolError> {
        if width < 64 && (value >> width) != 0 {
            return Err(ProtocolError::FieldOverflow { value, width });
        }
        for bit in (0..width).rev() {
            self.bits.push((value >> bit) & 1 == 1);
        }
        Ok(())
    }

    /// Append a signed value as a `width`-bit two's-complement field.
    ///
    /// The value is truncated to `width` bits, matching the AIS convention
    /// for fixed-point coordinate fields.
    pub fn push_signed(&mut self, value: i64, width: usize) {
        for bit in (0..width).rev() {
            self.bits.push((value >> bit) & 1 == 1);
        }
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append whole bytes, most significant bit of each byte first.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            for bit in (0..8).rev() {
                self.bits.push((byte >> bit) & 1 == 1);
            }
        }
    }

    /// Append a raw bit slice.
    pub fn extend_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Length in bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the bit string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// View of the underlying bits.
    #[must_use]
    pub fn as_bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Render as printable characters, one `'0'` or `'1'` per bit.
    ///
    /// This is the exact byte sequence the transport writes.
    #[must_use]
    pub fn render(&self) -> String {
        self.bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
    }
}
