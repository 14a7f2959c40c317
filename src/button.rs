//! Button and status register decoding.

use crate::registers::Register;

/// Which button state to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonQuery {
    /// Button is held down right now (BUTTON register).
    Pressed,
    /// Button went down since the last read (STATUS register).
    WasPressed,
}

/// BUTTON register byte to "is pressed". The line is active-low.
#[inline]
pub const fn decode_pressed(button: u8) -> bool {
    button == 0
}

/// STATUS register byte to "was pressed since last read".
#[inline]
pub const fn decode_was_pressed(status: u8) -> bool {
    status == 1
}

impl ButtonQuery {
    pub(crate) const fn register(self) -> Register {
        match self {
            ButtonQuery::Pressed => Register::Button,
            ButtonQuery::WasPressed => Register::Status,
        }
    }

    pub(crate) const fn decode(self, raw: u8) -> bool {
        match self {
            ButtonQuery::Pressed => decode_pressed(raw),
            ButtonQuery::WasPressed => decode_was_pressed(raw),
        }
    }
}
