//! Zero point band ("deadzone") around the stick's rest position.

/// Band around a zero point inside which readings snap to the zero point.
///
/// `low` is the offset of the lower edge and is expected to be `<= 0`;
/// `high` is the offset of the upper edge and is expected to be `>= 0`. Both
/// edges are inclusive. The default band is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadzone {
    pub low: i16,
    pub high: i16,
}

impl Deadzone {
    pub const NONE: Self = Self { low: 0, high: 0 };

    pub const fn new(low: i16, high: i16) -> Self {
        Self { low, high }
    }

    /// Band of `width` on both sides of the zero point.
    pub const fn symmetric(width: i16) -> Self {
        let w = if width < 0 { width.saturating_neg() } else { width };
        Self { low: -w, high: w }
    }

    /// Snap `value` to `zero_point` when it lies inside the band.
    pub fn apply(self, value: i16, zero_point: i16) -> i16 {
        normalize(value, zero_point, self)
    }
}

/// Collapse `value` to `zero_point` if it lies within `deadzone` of it.
///
/// - below the zero point: snapped when `value >= zero_point + low`
/// - above the zero point: snapped when `value <= zero_point + high`
///
/// Values outside the band pass through unchanged, so the function is
/// idempotent.
pub fn normalize(value: i16, zero_point: i16, deadzone: Deadzone) -> i16 {
    let (v, z) = (value as i32, zero_point as i32);

    if v < z && v >= z + deadzone.low as i32 {
        return zero_point;
    }
    if v > z && v <= z + deadzone.high as i32 {
        return zero_point;
    }
    value
}
