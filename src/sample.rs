//! One joystick reading.

use core::fmt::{self, Write};

use heapless::String;

use crate::button::{decode_pressed, decode_was_pressed};
use crate::codec::AxisRaw;
use crate::deadzone::Deadzone;
use crate::range::Range;
use crate::registers::{
    BURST_BUTTON, BURST_LEN, BURST_STATUS, BURST_X_LSB, BURST_X_MSB, BURST_Y_LSB, BURST_Y_MSB,
};

/// Capacity of a status line. The longest line is `"1023!1023!255!255"`.
pub const STATUS_LINE_LEN: usize = 24;

/// Positions on one scale plus the raw button and status bytes.
///
/// Produced fresh by every read; nothing is cached between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub horizontal: i16,
    pub vertical: i16,
    /// Raw BUTTON register (`0` while held).
    pub button: u8,
    /// Raw STATUS register (`1` if pressed since the last read).
    pub status: u8,
}

impl Sample {
    /// Decode a 6-byte burst read starting at X MSB.
    ///
    /// Both axes use `range`; `deadzone` is measured from the range's zero
    /// point.
    pub fn from_burst(burst: &[u8; BURST_LEN], range: Range, deadzone: Option<Deadzone>) -> Self {
        let x = AxisRaw::new(burst[BURST_X_MSB], burst[BURST_X_LSB]);
        let y = AxisRaw::new(burst[BURST_Y_MSB], burst[BURST_Y_LSB]);

        Self {
            horizontal: range.map_with(x, deadzone),
            vertical: range.map_with(y, deadzone),
            button: burst[BURST_BUTTON],
            status: burst[BURST_STATUS],
        }
    }

    pub const fn is_pressed(&self) -> bool {
        decode_pressed(self.button)
    }

    pub const fn was_pressed(&self) -> bool {
        decode_was_pressed(self.status)
    }

    /// `[H, V, button, status]`.
    pub fn to_array(&self) -> [i16; 4] {
        [
            self.horizontal,
            self.vertical,
            self.button as i16,
            self.status as i16,
        ]
    }

    /// `"H!V!B!S"`, e.g. `"-3!100!1!0"`.
    pub fn status_line(&self) -> String<STATUS_LINE_LEN> {
        let mut line = String::new();
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}!{}!{}!{}", self.horizontal, self.vertical, self.button, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stick at rest: 0x80 0x00 on both axes, button up, no press latched.
    const CENTRED: [u8; BURST_LEN] = [0x80, 0x00, 0x80, 0x00, 0x01, 0x00];

    #[test]
    fn centred_stick_on_every_scale() {
        for range in [Range::Full, Range::Unsigned, Range::Signed, Range::Percent] {
            let s = Sample::from_burst(&CENTRED, range, None);
            assert_eq!(s.horizontal, range.zero_point(), "{:?}", range);
            assert_eq!(s.vertical, range.zero_point(), "{:?}", range);
            assert!(!s.is_pressed());
            assert!(!s.was_pressed());
        }
    }

    #[test]
    fn axes_are_independent() {
        let burst = [0xFF, 0xC0, 0x00, 0x00, 0x00, 0x01];
        let s = Sample::from_burst(&burst, Range::Full, None);
        assert_eq!((s.horizontal, s.vertical), (1023, 0));
        assert!(s.is_pressed());
        assert!(s.was_pressed());

        let s = Sample::from_burst(&burst, Range::Percent, None);
        assert_eq!((s.horizontal, s.vertical), (100, -100));
    }

    #[test]
    fn deadzone_applies_to_both_axes() {
        // X = 0x7F40 >> 6 = 509, Y = 0x8140 >> 6 = 517.
        let burst = [0x7F, 0x40, 0x81, 0x40, 0x01, 0x00];
        let s = Sample::from_burst(&burst, Range::Full, Some(Deadzone::symmetric(5)));
        assert_eq!((s.horizontal, s.vertical), (512, 512));

        let s = Sample::from_burst(&burst, Range::Full, Some(Deadzone::symmetric(4)));
        assert_eq!((s.horizontal, s.vertical), (512, 517));
    }

    #[test]
    fn status_line_format() {
        let s = Sample { horizontal: -3, vertical: 100, button: 1, status: 0 };
        assert_eq!(s.status_line().as_str(), "-3!100!1!0");

        let widest = Sample { horizontal: 1023, vertical: -128, button: 255, status: 255 };
        assert_eq!(widest.status_line().as_str(), "1023!-128!255!255");
    }

    #[test]
    fn array_layout() {
        let s = Sample { horizontal: 7, vertical: -7, button: 0, status: 1 };
        assert_eq!(s.to_array(), [7, -7, 0, 1]);
    }
}
