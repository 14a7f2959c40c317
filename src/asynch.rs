//! Async driver for Embassy-style executors.
//!
//! Mirrors [`crate::Joystick`] over `embedded-hal-async`. Both drivers share
//! the error latch, decoding, scaling and packing code; only the bus calls
//! differ.

use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::i2c::I2c;
use heapless::String;

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
use crate::transport::ErrorLatch;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Async register transport. See [`crate::transport::RegisterTransport`].
pub struct RegisterTransport<I2C, D = NoDiagnostics> {
    i2c: I2C,
    latch: ErrorLatch<D>,
}

impl<I2C, D> RegisterTransport<I2C, D>
where
    I2C: I2c,
    D: DiagnosticSink,
{
    /// Take ownership of the bus. No I2C traffic.
    pub fn new(i2c: I2C, check_mode: bool, sink: D) -> Self {
        Self {
            i2c,
            latch: ErrorLatch::new(check_mode, sink),
        }
    }

    /// The error latch, for inspecting the last write outcome.
    pub fn latch(&self) -> &ErrorLatch<D> {
        &self.latch
    }

    /// The error latch, for resetting it or changing check-mode.
    pub fn latch_mut(&mut self) -> &mut ErrorLatch<D> {
        &mut self.latch
    }

    /// Give back the bus and the diagnostic sink.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.latch.into_sink())
    }

    /// Write `bytes` to `address` and latch the outcome.
    pub async fn write_registers(&mut self, address: u8, bytes: &[u8]) {
        let outcome = self.i2c.write(address, bytes).await.map_err(|e| e.kind());
        self.latch.record_write(address, outcome);
    }

    /// Read `buf.len()` bytes, zero-filled when blocked or on failure.
    pub async fn read_registers(&mut self, address: u8, buf: &mut [u8]) {
        if self.latch.blocks_reads() {
            buf.fill(0);
            return;
        }
        let outcome = self.i2c.read(address, buf).await.map_err(|e| e.kind());
        self.latch.settle_read(address, outcome, buf);
    }

    /// Select `register`, then read `buf.len()` consecutive registers.
    pub async fn read_block(&mut self, address: u8, register: Register, buf: &mut [u8]) {
        let select = [register.addr()];
        if self.latch.blocks_reads() {
            self.write_registers(address, &select).await;
            self.read_registers(address, buf).await;
            return;
        }
        let outcome = self
            .i2c
            .write_read(address, &select, buf)
            .await
            .map_err(|e| e.kind());
        self.latch.settle_write_read(address, outcome, buf);
    }

    pub async fn read_register(&mut self, address: u8, register: Register) -> u8 {
        let mut buf = [0u8; 1];
        self.read_block(address, register, &mut buf).await;
        buf[0]
    }

    pub async fn write_register(&mut self, address: u8, register: Register, value: u8) {
        self.write_registers(address, &[register.addr(), value]).await;
    }
}

// ---------------------------------------------------------------------------
// Joystick
// ---------------------------------------------------------------------------

/// Async driver for the Qwiic Joystick.
///
/// Same semantics as the blocking [`crate::Joystick`].
///
/// # Example
///
/// ```ignore
/// use qwiic_joystick::{asynch::Joystick, Config};
///
/// let mut joystick = Joystick::new(i2c, Config::default());
/// joystick.begin().await;
/// let word = joystick.read_packed(None).await;
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
    pub fn new(i2c: I2C, config: Config) -> Self {
        Self::with_diagnostics(i2c, config, NoDiagnostics)
    }
}

impl<I2C, D> Joystick<I2C, D>
where
    I2C: I2c,
    D: DiagnosticSink,
{
    pub fn with_diagnostics(i2c: I2C, config: Config, sink: D) -> Self {
        Self {
            transport: RegisterTransport::new(i2c, config.check_mode, sink),
            address: config.address(),
            range: config.range,
            deadzone: config.deadzone,
        }
    }

    pub fn release(self) -> (I2C, D) {
        self.transport.release()
    }

    // ── Session state ────────────────────────────────────────────────

    pub fn address(&self) -> u8 {
        self.address
    }

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

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.transport.latch().error()
    }

    pub fn error_code(&self) -> u8 {
        error_code(self.last_error())
    }

    // ── Startup ──────────────────────────────────────────────────────

    pub async fn begin(&mut self) {
        let check_mode = self.check_mode();
        self.begin_with(check_mode).await;
    }

    pub async fn begin_with(&mut self, check_mode: bool) {
        self.transport.latch_mut().reset(check_mode);
        self.clear_button_status().await;
    }

    // ── Position ─────────────────────────────────────────────────────

    pub async fn horizontal(&mut self) -> u16 {
        self.read_position(Register::XMsb).await
    }

    pub async fn vertical(&mut self) -> u16 {
        self.read_position(Register::YMsb).await
    }

    async fn read_position(&mut self, msb: Register) -> u16 {
        let mut buf = [0u8; 2];
        self.transport.read_block(self.address, msb, &mut buf).await;
        decode_u16(buf[0], buf[1])
    }

    pub async fn read_sample(&mut self, range: Range, deadzone: Option<Deadzone>) -> Sample {
        let burst = self.read_burst().await;
        Sample::from_burst(&burst, range, deadzone)
    }

    pub async fn read(&mut self) -> Sample {
        self.read_sample(self.range, self.deadzone).await
    }

    async fn read_burst(&mut self) -> [u8; BURST_LEN] {
        let mut burst = [0u8; BURST_LEN];
        self.transport
            .read_block(self.address, Register::XMsb, &mut burst)
            .await;
        burst
    }

    // ── Button ───────────────────────────────────────────────────────

    pub async fn button(&mut self, query: ButtonQuery) -> bool {
        let raw = self
            .transport
            .read_register(self.address, query.register())
            .await;
        query.decode(raw)
    }

    pub async fn is_pressed(&mut self) -> bool {
        self.button(ButtonQuery::Pressed).await
    }

    pub async fn was_pressed(&mut self) -> bool {
        self.button(ButtonQuery::WasPressed).await
    }

    pub async fn clear_button_status(&mut self) {
        self.transport
            .write_register(self.address, Register::Status, 0)
            .await;
    }

    // ── Text and packed output ───────────────────────────────────────

    pub async fn status_line(&mut self, range: Range) -> String<STATUS_LINE_LEN> {
        self.read_sample(range, None).await.status_line()
    }

    pub async fn status_line_default(&mut self) -> String<STATUS_LINE_LEN> {
        self.status_line(self.range).await
    }

    pub async fn read_packed(&mut self, override_byte: Option<u8>) -> u32 {
        self.read_frame(override_byte).await.to_word()
    }

    pub async fn read_frame(&mut self, override_byte: Option<u8>) -> PackedFrame {
        let burst = self.read_burst().await;
        PackedFrame::from_burst(&burst, override_byte)
    }

    /// Sample and packed frame from a single burst, so both see STATUS.
    pub async fn read_with_frame(
        &mut self,
        override_byte: Option<u8>,
    ) -> (Sample, PackedFrame) {
        let burst = self.read_burst().await;
        (
            Sample::from_burst(&burst, self.range, self.deadzone),
            PackedFrame::from_burst(&burst, override_byte),
        )
    }

    // ── Raw register access ──────────────────────────────────────────

    pub async fn read_register(&mut self, register: Register) -> u8 {
        self.transport.read_register(self.address, register).await
    }

    pub async fn read_block(&mut self, register: Register, buf: &mut [u8]) {
        self.transport.read_block(self.address, register, buf).await;
    }

    pub async fn write_register(&mut self, register: Register, value: u8) {
        self.transport
            .write_register(self.address, register, value)
            .await;
    }
}
