//! Error types for the joystick driver.
//!
//! Bus failures are not reported through this type: they are latched inside
//! the driver and read back with `last_error()`. [`JoystickError`] only covers
//! invalid arguments to configuration and packing calls.

use core::fmt;

/// Errors returned by argument-checked driver calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickError {
    /// Address does not fit in 7 bits.
    InvalidAddress(u8),

    /// A write to the transmit buffer would run past its 4 bytes.
    OutOfRange {
        /// Requested byte offset.
        offset: usize,
        /// Width in bytes of the requested number format.
        width: usize,
    },
}

impl fmt::Display for JoystickError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JoystickError::InvalidAddress(addr) => {
                write!(f, "Invalid I2C address {:#04x} (must be 0x00-0x7f)", addr)
            }
            JoystickError::OutOfRange { offset, width } => {
                write!(f, "{} byte value at offset {} does not fit in 4 bytes", width, offset)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for JoystickError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            JoystickError::InvalidAddress(addr) => {
                defmt::write!(f, "Invalid I2C address {=u8:#04x}", addr)
            }
            JoystickError::OutOfRange { offset, width } => {
                defmt::write!(f, "{=usize} byte value at offset {=usize} out of range", width, offset)
            }
        }
    }
}

/// Numeric code for a latched bus error. `0` is reserved for "no error".
///
/// Useful when the error has to travel somewhere that only carries integers,
/// such as a status byte on the radio link.
pub fn error_code(kind: Option<embedded_hal::i2c::ErrorKind>) -> u8 {
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    match kind {
        None => 0,
        Some(ErrorKind::Bus) => 1,
        Some(ErrorKind::ArbitrationLoss) => 2,
        Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)) => 3,
        Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)) => 4,
        Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)) => 5,
        Some(ErrorKind::Overrun) => 6,
        Some(_) => 0xFF,
    }
}
