//! Register map of the Qwiic Joystick firmware.
//!
//! The peripheral exposes a flat, single-byte register address space. Reads
//! auto-increment, so the six registers from [`Register::XMsb`] through
//! [`Register::Status`] can be fetched in one burst.

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Register addresses understood by the joystick firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// I2C address stored in EEPROM.
    Id = 0x00,
    /// Firmware version, major byte.
    Version1 = 0x01,
    /// Firmware version, minor byte.
    Version2 = 0x02,
    /// Horizontal position, most significant byte.
    XMsb = 0x03,
    /// Horizontal position, low byte. Only bits 7..6 carry data.
    XLsb = 0x04,
    /// Vertical position, most significant byte.
    YMsb = 0x05,
    /// Vertical position, low byte. Only bits 7..6 carry data.
    YLsb = 0x06,
    /// Current button level. `0` while held down (active-low).
    Button = 0x07,
    /// `1` if the button was pressed since the last read. Clears on read.
    Status = 0x08,
    /// Lock register guarding address changes.
    I2cLock = 0x09,
    /// Current/new I2C address (persisted to EEPROM by the firmware).
    ChangeAddress = 0x0A,
}

impl Register {
    /// Raw register number as sent on the bus.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Default I2C address of the Qwiic Joystick.
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Highest valid 7-bit I2C address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Number of registers read in one burst starting at [`Register::XMsb`]:
/// X MSB, X LSB, Y MSB, Y LSB, BUTTON, STATUS.
pub const BURST_LEN: usize = 6;

/// Right shift applied to a 16-bit position pair. Only the top 10 bits of
/// the pair hold ADC data.
pub const POSITION_SHIFT: u32 = 6;

// Offsets of each field inside a burst read.
pub(crate) const BURST_X_MSB: usize = 0;
pub(crate) const BURST_X_LSB: usize = 1;
pub(crate) const BURST_Y_MSB: usize = 2;
pub(crate) const BURST_Y_LSB: usize = 3;
pub(crate) const BURST_BUTTON: usize = 4;
pub(crate) const BURST_STATUS: usize = 5;
