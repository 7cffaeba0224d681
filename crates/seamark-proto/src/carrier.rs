//! AIS type 4 base-station position report — the carrier frame.
//!
//! Carriers are the routine position reports sent ahead of the
//! authenticated frame; their rendered bytes feed the session transcript
//! and, at filter-bearing levels, the Bloom accumulator. The sender role
//! uses fixed sample field values; timestamp fields default to the AIS
//! "not available" sentinels.

use crate::{bits::BitString, errors::ProtocolError};

/// Fixed-point scale applied to coordinates (1/10000 arc minute).
const COORDINATE_SCALE: f64 = 600_000.0;

/// Bit length of an encoded position report.
pub const POSITION_REPORT_BITS: usize = 168;

/// AIS type 4 position report fields for the sender role.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    /// 30-bit maritime mobile service identity
    pub mmsi: u32,
    /// UTC hour, 24 = not available (5 bits)
    pub hour: u8,
    /// UTC minute, 60 = not available (6 bits)
    pub minute: u8,
    /// UTC second, 60 = not available (6 bits)
    pub second: u8,
    /// Position accuracy flag, true = under 10 m
    pub accuracy: bool,
    /// Longitude in degrees east, fixed-point encoded over 28 bits
    pub longitude: f64,
    /// Latitude in degrees north, fixed-point encoded over 27 bits
    pub latitude: f64,
    /// Electronic position fixing device type (4 bits), 1 = GPS
    pub device_type: u8,
}

impl Default for PositionReport {
    fn default() -> Self {
        Self {
            mmsi: 247_320_162,
            hour: 24,
            minute: 60,
            second: 60,
            accuracy: true,
            longitude: 9.723_578_333_333_33,
            latitude: 45.691_016_666_666_7,
            device_type: 1,
        }
    }
}

impl PositionReport {
    /// Encode the report as a 168-bit AIS type 4 frame.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FieldOverflow`] if a field value exceeds its
    ///   fixed width
    pub fn encode(&self) -> Result<BitString, ProtocolError> {
        let mut bits = BitString::with_capacity(POSITION_REPORT_BITS);
        bits.push_uint(4, 6)?; // message type
        bits.push_uint(0, 2)?; // repeat indicator
        bits.push_uint(u64::from(self.mmsi), 30)?;
        bits.push_uint(0, 23)?; // year, month, day unused by the sender role
        bits.push_uint(u64::from(self.hour), 5)?;
        bits.push_uint(u64::from(self.minute), 6)?;
        bits.push_uint(u64::from(self.second), 6)?;
        bits.push_bit(self.accuracy);
        bits.push_signed(scale_coordinate(self.longitude), 28);
        bits.push_signed(scale_coordinate(self.latitude), 27);
        bits.push_uint(u64::from(self.device_type), 4)?;
        bits.push_uint(0, 11)?; // transmission control, spare, RAIM flag
        bits.push_uint(0, 19)?; // radio status
        debug_assert_eq!(bits.len(), POSITION_REPORT_BITS);
        Ok(bits)
    }
}

/// Degrees to the 1/10000 arc-minute fixed-point wire value.
fn scale_coordinate(degrees: f64) -> i64 {
    (degrees * COORDINATE_SCALE).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_to_168_bits() {
        let bits = PositionReport::default().encode().unwrap();
        assert_eq!(bits.len(), POSITION_REPORT_BITS);
    }

    #[test]
    fn starts_with_type_and_mmsi() {
        let rendered = PositionReport::default().encode().unwrap().render();
        assert_eq!(&rendered[..6], "000100", "message type 4");
        assert_eq!(&rendered[6..8], "00", "repeat indicator");
        // 247320162 over 30 bits
        assert_eq!(&rendered[8..38], format!("{:030b}", 247_320_162u32));
    }

    #[test]
    fn encoding_is_deterministic() {
        let report = PositionReport::default();
        assert_eq!(report.encode().unwrap(), report.encode().unwrap());
    }

    #[test]
    fn southern_latitude_uses_two_complement() {
        let report = PositionReport { latitude: -33.865, ..PositionReport::default() };
        let rendered = report.encode().unwrap().render();
        // Latitude field sits after 6+2+30+23+5+6+6+1+28 = 107 bits
        let lat_field = &rendered[107..134];
        assert_eq!(lat_field.len(), 27);
        assert!(lat_field.starts_with('1'), "negative latitude must set the sign bit");
    }

    #[test]
    fn oversized_mmsi_is_rejected() {
        let report = PositionReport { mmsi: 1 << 30, ..PositionReport::default() };
        assert!(matches!(report.encode(), Err(ProtocolError::FieldOverflow { .. })));
    }

    #[test]
    fn sample_values_match_sender_role() {
        let report = PositionReport::default();
        assert_eq!(report.mmsi, 247_320_162);
        assert_eq!(report.device_type, 1, "GPS");
    }
}
