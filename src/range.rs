//! Output scales for axis readings.
//!
//! Each [`Range`] maps one axis's raw register pair to a signed value and
//! names the zero point the deadzone is measured from. The mapping lives in a
//! single table so every scale and its rest position are defined side by side.

use crate::codec::AxisRaw;
use crate::deadzone::{normalize, Deadzone};

/// Selectable output scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// `0..=1023`, centre 512. Uses all 10 bits of the position pair.
    Full = 0,
    /// `0..=255`, centre 128. MSB register only.
    Unsigned = 1,
    /// `-128..=127`, centre 0.
    Signed = 2,
    /// `-100..=100`, centre 0.
    #[default]
    Percent = 3,
}

/// Scale function and rest position for one [`Range`].
#[derive(Clone, Copy)]
struct Scale {
    map: fn(AxisRaw) -> i16,
    zero_point: i16,
}

const SCALES: [Scale; 4] = [
    Scale { map: map_full, zero_point: 512 },
    Scale { map: map_unsigned, zero_point: 128 },
    Scale { map: map_signed, zero_point: 0 },
    Scale { map: map_percent, zero_point: 0 },
];

fn map_full(raw: AxisRaw) -> i16 {
    raw.fine() as i16
}

fn map_unsigned(raw: AxisRaw) -> i16 {
    raw.coarse() as i16
}

fn map_signed(raw: AxisRaw) -> i16 {
    raw.coarse() as i16 - 128
}

// round(msb * 200 / 255 - 100), halves toward +inf.
// With n = 200 * msb - 25500 this is floor((2n + 255) / 510); 2n + 255 is
// always odd so no value sits exactly on a half.
fn map_percent(raw: AxisRaw) -> i16 {
    let n = 200 * raw.coarse() as i32 - 25_500;
    (2 * n + 255).div_euclid(510) as i16
}

impl Range {
    fn scale(self) -> Scale {
        SCALES[self as usize]
    }

    /// Rest position of the scale; the deadzone is measured from here.
    pub fn zero_point(self) -> i16 {
        self.scale().zero_point
    }

    /// Map one axis without any deadzone.
    pub fn map(self, raw: AxisRaw) -> i16 {
        (self.scale().map)(raw)
    }

    /// Map one axis, then snap it to the zero point if inside `deadzone`.
    pub fn map_with(self, raw: AxisRaw, deadzone: Option<Deadzone>) -> i16 {
        let scale = self.scale();
        let value = (scale.map)(raw);
        match deadzone {
            Some(dz) => normalize(value, scale.zero_point, dz),
            None => value,
        }
    }

    /// Smallest and largest value the scale can produce.
    pub fn bounds(self) -> (i16, i16) {
        match self {
            Range::Full => (0, 1023),
            Range::Unsigned => (0, 255),
            Range::Signed => (-128, 127),
            Range::Percent => (-100, 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coarse(msb: u8) -> AxisRaw {
        AxisRaw::new(msb, 0)
    }

    #[test]
    fn zero_points() {
        assert_eq!(Range::Full.zero_point(), 512);
        assert_eq!(Range::Unsigned.zero_point(), 128);
        assert_eq!(Range::Signed.zero_point(), 0);
        assert_eq!(Range::Percent.zero_point(), 0);
    }

    #[test]
    fn full_uses_both_registers() {
        assert_eq!(Range::Full.map(AxisRaw::new(0x80, 0x00)), 512);
        assert_eq!(Range::Full.map(AxisRaw::new(0xFF, 0xC0)), 1023);
        assert_eq!(Range::Full.map(AxisRaw::new(0x00, 0x40)), 1);
    }

    #[test]
    fn unsigned_and_signed_ignore_lsb() {
        assert_eq!(Range::Unsigned.map(AxisRaw::new(0x80, 0xFF)), 128);
        assert_eq!(Range::Signed.map(coarse(0)), -128);
        assert_eq!(Range::Signed.map(coarse(128)), 0);
        assert_eq!(Range::Signed.map(coarse(255)), 127);
    }

    #[test]
    fn percent_anchor_points() {
        assert_eq!(Range::Percent.map(coarse(0)), -100);
        assert_eq!(Range::Percent.map(coarse(128)), 0);
        assert_eq!(Range::Percent.map(coarse(255)), 100);
        // 64 * 200 / 255 - 100 = -49.80...
        assert_eq!(Range::Percent.map(coarse(64)), -50);
        // 127 * 200 / 255 - 100 = -0.39...
        assert_eq!(Range::Percent.map(coarse(127)), 0);
        // 192 * 200 / 255 - 100 = 50.58...
        assert_eq!(Range::Percent.map(coarse(192)), 51);
    }

    #[test]
    fn percent_matches_float_rounding() {
        for msb in 0..=u8::MAX {
            let exact = msb as f64 * 200.0 / 255.0 - 100.0;
            let expected = (exact + 0.5).floor() as i16;
            assert_eq!(Range::Percent.map(coarse(msb)), expected, "msb {}", msb);
        }
    }

    #[test]
    fn every_scale_stays_in_bounds() {
        for range in [Range::Full, Range::Unsigned, Range::Signed, Range::Percent] {
            let (lo, hi) = range.bounds();
            for msb in 0..=u8::MAX {
                for lsb in [0x00u8, 0x40, 0x80, 0xC0, 0xFF] {
                    let v = range.map(AxisRaw::new(msb, lsb));
                    assert!(v >= lo && v <= hi, "{:?} produced {}", range, v);
                }
            }
        }
    }

    #[test]
    fn map_with_uses_scale_zero_point() {
        let dz = Some(Deadzone::symmetric(5));
        // 0x7E -> 126, within 5 of 128.
        assert_eq!(Range::Unsigned.map_with(coarse(0x7E), dz), 128);
        // Same byte on the signed scale is -2, within 5 of 0.
        assert_eq!(Range::Signed.map_with(coarse(0x7E), dz), 0);
        assert_eq!(Range::Signed.map_with(coarse(0x7E), None), -2);
    }
}
