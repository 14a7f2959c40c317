//! Driver configuration.

use crate::deadzone::Deadzone;
use crate::error::JoystickError;
use crate::range::Range;
use crate::registers::{DEFAULT_ADDRESS, MAX_ADDRESS};

/// Settings for a [`Joystick`](crate::Joystick) session.
///
/// [`Config::default()`] talks to address `0x20` with check-mode off, reads
/// in [`Range::Percent`] and applies no deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    address: u8,
    /// Stop reading from the bus after a failed write until a write succeeds.
    pub check_mode: bool,
    /// Scale used by `read()` and `status_line_default()`.
    pub range: Range,
    /// Deadzone used by `read()`. `None` disables it.
    pub deadzone: Option<Deadzone>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            check_mode: false,
            range: Range::Percent,
            deadzone: None,
        }
    }
}

impl Config {
    /// 7-bit I2C address, always `<= 0x7F`.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Set the device address. Fails for anything above `0x7F`.
    pub fn with_address(mut self, address: u8) -> Result<Self, JoystickError> {
        self.address = validate_address(address)?;
        Ok(self)
    }

    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn with_deadzone(mut self, deadzone: Deadzone) -> Self {
        self.deadzone = Some(deadzone);
        self
    }
}

pub(crate) fn validate_address(address: u8) -> Result<u8, JoystickError> {
    if address > MAX_ADDRESS {
        return Err(JoystickError::InvalidAddress(address));
    }
    Ok(address)
}
