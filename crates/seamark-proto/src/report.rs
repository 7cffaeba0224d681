//! AIS type 8 binary broadcast — the authenticated frame.
//!
//! Authentication material travels as the application payload of a type 8
//! binary broadcast. A payload longer than one slot group is split into
//! consecutive frames, each with its own 56-bit header, in order.

use crate::{
    bits::BitString,
    errors::ProtocolError,
    level::SLOT_CAPACITY,
};

/// Bit length of the type 8 application header.
pub const BROADCAST_HEADER_BITS: usize = 56;

/// AIS type 8 binary broadcast header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBroadcast {
    /// 30-bit maritime mobile service identity
    pub mmsi: u32,
    /// 10-bit designated area code of the application id
    pub designated_area_code: u16,
    /// 6-bit function id of the application id
    pub function_id: u8,
}

impl Default for BinaryBroadcast {
    fn default() -> Self {
        Self { mmsi: 247_320_162, designated_area_code: 0, function_id: 51 }
    }
}

impl BinaryBroadcast {
    /// Encode the 56-bit application header.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FieldOverflow`] if a field value exceeds its
    ///   fixed width
    pub fn encode_header(&self) -> Result<BitString, ProtocolError> {
        let mut bits = BitString::with_capacity(BROADCAST_HEADER_BITS);
        bits.push_uint(8, 6)?; // message type
        bits.push_uint(0, 2)?; // repeat indicator
        bits.push_uint(u64::from(self.mmsi), 30)?;
        bits.push_uint(0, 2)?; // spare
        bits.push_uint(u64::from(self.designated_area_code), 10)?;
        bits.push_uint(u64::from(self.function_id), 6)?;
        debug_assert_eq!(bits.len(), BROADCAST_HEADER_BITS);
        Ok(bits)
    }

    /// Wrap an application payload into one or more complete frames.
    ///
    /// The payload is split into consecutive [`SLOT_CAPACITY`]-byte
    /// chunks; each chunk gets its own header. An empty payload still
    /// produces one header-only frame.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FieldOverflow`] if a header field value exceeds
    ///   its fixed width
    pub fn encode_fragments(&self, payload: &BitString) -> Result<Vec<BitString>, ProtocolError> {
        let chunk_bits = SLOT_CAPACITY * 8;
        let mut frames = Vec::new();
        let bits = payload.as_bits();

        if bits.is_empty() {
            let mut frame = self.encode_header()?;
            frame.extend_bits(bits);
            frames.push(frame);
            return Ok(frames);
        }

        for chunk in bits.chunks(chunk_bits) {
            let mut frame = self.encode_header()?;
            frame.extend_bits(chunk);
            frames.push(frame);
        }
        Ok(frames)
    }
}
