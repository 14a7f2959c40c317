//! High-level interface for the SparkFun Qwiic Joystick.
//!
//! [`Joystick`] wraps the register transport with the device address, the
//! configured scale and deadzone, and the error latch. It is the session
//! object: independent joysticks (or tests) each own one and share no state.

use embedded_hal::i2c::{ErrorKind, I2c};

use crate::button::ButtonQuery;
use crate::codec::decode_u16;
use crate::config::{validate_address, Config};
use crate::deadzone::Deadzone;
use crate::diagnostics::{DiagnosticSink, NoDiagnostics};
use crate::error::{error_code, JoystickError};
use crate::packer::PackedFrame;
use crate::range::Range;
use crate::registers::{Register, BURST_LEN};
use crate::sample::{Sample, STATUS_LINE_LEN};
use crate::transport::RegisterTransport;

use heapless::String;

/// Blocking driver for the Qwiic Joystick.
///
/// No operation returns a bus error. Failed writes are latched and can be
/// inspected with [`last_error`](Self::last_error); with check-mode on,
/// reads made while an error is latched return zeros.
///
/// # Example
///
/// ```no_run
/// use qwiic_joystick::{Config, Joystick, Range};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut joystick = Joystick::new(i2c, Config::default().with_check_mode(true));
/// joystick.begin();
///
/// let sample = joystick.read_sample(Range::Percent, None);
/// if joystick.last_error().is_none() && sample.is_pressed() {
///     // ...
/// }
/// # }
/// ```
pub struct Joystick<I2C, D = NoDiagnostics> {
    transport: RegisterTransport<I2C, D>,
    address: u8,
    range: Range,
    deadzone: Option<Deadzone>,
}

impl<I2C> Joystick<I2C, NoDiagnostics>
where
    I2C: I2c,
{
    /// Create a driver without a diagnostic sink. No I2C traffic.
    pub fn new(i2c: I2C, config: Config) -> Self {
        Self::with_diagnostics(i2c, config, NoDiagnostics)
    }
}

impl<I2C, D> Joystick<I2C, D>
where
    I2C: I2c,
    D: DiagnosticSink,
{
    /// Create a driver that reports the first failed write of each error
    /// episode to `sink` (check-mode only). No I2C traffic.
    pub fn with_diagnostics(i2c: I2C, config: Config, sink: D) -> Self {
        Self {
            transport: RegisterTransport::new(i2c, config.check_mode, sink),
            address: config.address(),
            range: config.range,
            deadzone: config.deadzone,
        }
    }

    /// Give back the I2C bus and the diagnostic sink.
    pub fn release(self) -> (I2C, D) {
        self.transport.release()
    }

    // -----------------------------------------------------------------------
    // Session state
    // -----------------------------------------------------------------------

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Talk to a joystick at a different 7-bit address.
    pub fn set_address(&mut self, address: u8) -> Result<(), JoystickError> {
        self.address = validate_address(address)?;
        Ok(())
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn set_range(&mut self, range: Range) {
        self.range = range;
    }

    pub fn deadzone(&self) -> Option<Deadzone> {
        self.deadzone
    }

    pub fn set_deadzone(&mut self, deadzone: Option<Deadzone>) {
        self.deadzone = deadzone;
    }

    pub fn check_mode(&self) -> bool {
        self.transport.latch().check_mode()
    }

    /// Outcome of the most recent write. `None` means it succeeded.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.transport.latch().error()
    }

    /// [`last_error`](Self::last_error) as a number, `0` for no error.
    pub fn error_code(&self) -> u8 {
        error_code(self.last_error())
    }

    // -----------------------------------------------------------------------
    // Startup
    // -----------------------------------------------------------------------

    /// Clear the latched error, keep the current check-mode, and clear the
    /// "was pressed" status on the device.
    pub fn begin(&mut self) {
        let check_mode = self.check_mode();
        self.begin_with(check_mode);
    }

    /// Like [`begin`](Self::begin), switching check-mode on or off.
    pub fn begin_with(&mut self, check_mode: bool) {
        self.transport.latch_mut().reset(check_mode);
        self.clear_button_status();
    }

    // -----------------------------------------------------------------------
    // Position
    // -----------------------------------------------------------------------

    /// Horizontal position, `0..=1023`.
    pub fn horizontal(&mut self) -> u16 {
        self.read_position(Register::XMsb)
    }

    /// Vertical position, `0..=1023`.
    pub fn vertical(&mut self) -> u16 {
        self.read_position(Register::YMsb)
    }

    fn read_position(&mut self, msb: Register) -> u16 {
        let mut buf = [0u8; 2];
        self.transport.read_block(self.address, msb, &mut buf);
        decode_u16(buf[0], buf[1])
    }

    /// Read both axes, the button and the status in one burst.
    ///
    /// Note that reading clears the device's STATUS register.
    pub fn read_sample(&mut self, range: Range, deadzone: Option<Deadzone>) -> Sample {
        let burst = self.read_burst();
        Sample::from_burst(&burst, range, deadzone)
    }

    /// [`read_sample`](Self::read_sample) with the configured range and
    /// deadzone.
    pub fn read(&mut self) -> Sample {
        self.read_sample(self.range, self.deadzone)
    }

    fn read_burst(&mut self) -> [u8; BURST_LEN] {
        let mut burst = [0u8; BURST_LEN];
        self.transport.read_block(self.address, Register::XMsb, &mut burst);
        burst
    }

    // -----------------------------------------------------------------------
    // Button
    // -----------------------------------------------------------------------

    pub fn button(&mut self, query: ButtonQuery) -> bool {
        let raw = self.transport.read_register(self.address, query.register());
        query.decode(raw)
    }

    /// Button is held down right now.
    pub fn is_pressed(&mut self) -> bool {
        self.button(ButtonQuery::Pressed)
    }

    /// Button was pressed since the STATUS register was last read or cleared.
    pub fn was_pressed(&mut self) -> bool {
        self.button(ButtonQuery::WasPressed)
    }

    /// Clear the "was pressed" status by writing `0` to STATUS.
    pub fn clear_button_status(&mut self) {
        self.transport.write_register(self.address, Register::Status, 0);
    }

    // -----------------------------------------------------------------------
    // Text and packed output
    // -----------------------------------------------------------------------

    /// `"H!V!B!S"` on `range`, with raw button and status bytes and no
    /// deadzone.
    pub fn status_line(&mut self, range: Range) -> String<STATUS_LINE_LEN> {
        self.read_sample(range, None).status_line()
    }

    /// [`status_line`](Self::status_line) on the configured range.
    pub fn status_line_default(&mut self) -> String<STATUS_LINE_LEN> {
        self.status_line(self.range)
    }

    /// Coarse H, coarse V, button (or `override_byte`) and status packed
    /// into a little-endian `u32`.
    pub fn read_packed(&mut self, override_byte: Option<u8>) -> u32 {
        self.read_frame(override_byte).to_word()
    }

    /// [`read_packed`](Self::read_packed) before packing.
    pub fn read_frame(&mut self, override_byte: Option<u8>) -> PackedFrame {
        let burst = self.read_burst();
        PackedFrame::from_burst(&burst, override_byte)
    }

    /// [`read`](Self::read) and [`read_frame`](Self::read_frame) decoded from
    /// the same burst.
    ///
    /// STATUS clears when it is read, so calling the two separately leaves the
    /// second one with a status of `0`.
    pub fn read_with_frame(&mut self, override_byte: Option<u8>) -> (Sample, PackedFrame) {
        let burst = self.read_burst();
        (
            Sample::from_burst(&burst, self.range, self.deadzone),
            PackedFrame::from_burst(&burst, override_byte),
        )
    }

    // -----------------------------------------------------------------------
    // Raw register access
    // -----------------------------------------------------------------------

    pub fn read_register(&mut self, register: Register) -> u8 {
        self.transport.read_register(self.address, register)
    }

    /// Read `buf.len()` consecutive registers starting at `register`.
    pub fn read_block(&mut self, register: Register, buf: &mut [u8]) {
        self.transport.read_block(self.address, register, buf);
    }

    pub fn write_register(&mut self, register: Register, value: u8) {
        self.transport.write_register(self.address, register, value);
    }
}
