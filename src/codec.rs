//! Raw register byte decoding.

use crate::registers::POSITION_SHIFT;

/// Decode a big-endian position pair into its 10-bit magnitude (`0..=1023`).
#[inline]
pub const fn decode_u16(msb: u8, lsb: u8) -> u16 {
    u16::from_be_bytes([msb, lsb]) >> POSITION_SHIFT
}

/// Coarse 8-bit magnitude: the MSB register taken as-is.
#[inline]
pub const fn decode_u8(msb: u8) -> u8 {
    msb
}

/// One axis worth of raw register bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisRaw {
    pub msb: u8,
    pub lsb: u8,
}

impl AxisRaw {
    pub const fn new(msb: u8, lsb: u8) -> Self {
        Self { msb, lsb }
    }

    pub const fn fine(self) -> u16 {
        decode_u16(self.msb, self.lsb)
    }

    pub const fn coarse(self) -> u8 {
        decode_u8(self.msb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_u16_drops_low_six_bits() {
        assert_eq!(decode_u16(0x00, 0x00), 0);
        assert_eq!(decode_u16(0x80, 0x00), 512);
        assert_eq!(decode_u16(0x80, 0x3F), 512);
        assert_eq!(decode_u16(0x80, 0x40), 513);
        assert_eq!(decode_u16(0xFF, 0xFF), 1023);
    }

    #[test]
    fn decode_u16_stays_in_ten_bits() {
        for msb in [0x00u8, 0x01, 0x7F, 0x80, 0xC3, 0xFE, 0xFF] {
            for lsb in 0..=u8::MAX {
                let pair = u16::from_be_bytes([msb, lsb]);
                let v = decode_u16(msb, lsb);
                assert_eq!(v, pair >> 6);
                assert!(v <= 1023);
            }
        }
    }

    #[test]
    fn axis_raw_views() {
        let axis = AxisRaw::new(0x12, 0xC0);
        assert_eq!(axis.coarse(), 0x12);
        assert_eq!(axis.fine(), (0x12 << 2) | 0x03);
    }
}
