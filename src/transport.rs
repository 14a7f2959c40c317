//! Register-level I2C access with a latched error state.
//!
//! Bus errors are never returned to the caller. Each write records its
//! outcome in an [`ErrorLatch`]; reads consult the latch and, when
//! check-mode is on and an error is pending, return zeros without touching
//! the bus.
//!
//! A register read is a select write (`[register]`) followed by a read of N
//! bytes. Normally both go out as one `write_read` with a repeated start, and
//! its outcome is latched as the select write's. While reads are blocked the
//! select write goes out alone, so a recovered bus is noticed and the read
//! follows as a separate transaction.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::diagnostics::{hex_address, DiagnosticSink, NoDiagnostics};
use crate::registers::Register;

// ---------------------------------------------------------------------------
// Error latch
// ---------------------------------------------------------------------------

/// Last write outcome plus the check-mode policy.
///
/// Every write overwrites the latched value, so a successful write clears a
/// previous error and re-arms the report. With check-mode on, the transition
/// from "no error" to "error" is reported once through the sink.
pub struct ErrorLatch<D = NoDiagnostics> {
    error: Option<ErrorKind>,
    check_mode: bool,
    sink: D,
}

impl<D> ErrorLatch<D>
where
    D: DiagnosticSink,
{
    /// Start with no error latched.
    pub fn new(check_mode: bool, sink: D) -> Self {
        Self {
            error: None,
            check_mode,
            sink,
        }
    }

    /// Clear the latched error and set the check-mode policy.
    pub fn reset(&mut self, check_mode: bool) {
        self.error = None;
        self.check_mode = check_mode;
    }

    /// Outcome of the most recent write, `None` if it succeeded.
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Whether failed writes are reported and block later reads.
    pub fn check_mode(&self) -> bool {
        self.check_mode
    }

    /// Reads are replaced by zeros while this holds.
    pub fn blocks_reads(&self) -> bool {
        self.check_mode && self.error.is_some()
    }

    /// Latch the outcome of a write to `address`.
    ///
    /// Returns `true` if this write opened a new error episode and was
    /// reported.
    pub fn record_write(&mut self, address: u8, outcome: Result<(), ErrorKind>) -> bool {
        let was_clear = self.error.is_none();
        self.error = outcome.err();

        match self.error {
            Some(_kind) if self.check_mode && was_clear => {
                #[cfg(feature = "defmt")]
                defmt::warn!("I2C write to {=u8:#04x} failed: {}", address, _kind);

                self.sink.show(&hex_address(address));
                true
            }
            _ => false,
        }
    }

    /// Finish a read into `buf`: on failure the buffer is zero-filled.
    /// Read failures are not latched.
    pub fn settle_read(&mut self, _address: u8, outcome: Result<(), ErrorKind>, buf: &mut [u8]) {
        if let Err(_kind) = outcome {
            #[cfg(feature = "defmt")]
            defmt::debug!("I2C read from {=u8:#04x} failed: {}", _address, _kind);

            buf.fill(0);
        }
    }

    /// Finish a combined select-and-read into `buf`.
    ///
    /// The outcome is latched like a write, since the select write cannot be
    /// told apart from the read, and `buf` is zero-filled on failure.
    pub fn settle_write_read(
        &mut self,
        address: u8,
        outcome: Result<(), ErrorKind>,
        buf: &mut [u8],
    ) {
        self.record_write(address, outcome);
        if outcome.is_err() {
            buf.fill(0);
        }
    }

    pub(crate) fn into_sink(self) -> D {
        self.sink
    }
}

// ---------------------------------------------------------------------------
// Blocking transport
// ---------------------------------------------------------------------------

/// Blocking register transport over an `embedded-hal` I2C bus.
///
/// Owns the bus for exclusive access. The device address is passed per call
/// so one transport can, in principle, reach any address on the bus.
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

    // -----------------------------------------------------------------------
    // Core protocol primitives
    // -----------------------------------------------------------------------

    /// Write `bytes` to `address` and latch the outcome.
    pub fn write_registers(&mut self, address: u8, bytes: &[u8]) {
        let outcome = self.i2c.write(address, bytes).map_err(|e| e.kind());
        self.latch.record_write(address, outcome);
    }

    /// Read `buf.len()` bytes from `address`.
    ///
    /// Zero-fills `buf` without bus traffic when check-mode is on and an
    /// error is latched, and zero-fills it when the read itself fails.
    pub fn read_registers(&mut self, address: u8, buf: &mut [u8]) {
        if self.latch.blocks_reads() {
            buf.fill(0);
            return;
        }
        let outcome = self.i2c.read(address, buf).map_err(|e| e.kind());
        self.latch.settle_read(address, outcome, buf);
    }

    // -----------------------------------------------------------------------
    // Register helpers
    // -----------------------------------------------------------------------

    /// Select `register`, then read `buf.len()` consecutive registers.
    pub fn read_block(&mut self, address: u8, register: Register, buf: &mut [u8]) {
        let select = [register.addr()];
        if self.latch.blocks_reads() {
            self.write_registers(address, &select);
            self.read_registers(address, buf);
            return;
        }
        let outcome = self
            .i2c
            .write_read(address, &select, buf)
            .map_err(|e| e.kind());
        self.latch.settle_write_read(address, outcome, buf);
    }

    /// Read a single register.
    pub fn read_register(&mut self, address: u8, register: Register) -> u8 {
        let mut buf = [0u8; 1];
        self.read_block(address, register, &mut buf);
        buf[0]
    }

    /// Write one byte to `register` in a single transaction.
    pub fn write_register(&mut self, address: u8, register: Register, value: u8) {
        self.write_registers(address, &[register.addr(), value]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = 0x20;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl DiagnosticSink for &mut Recorder {
        fn show(&mut self, text: &str) {
            self.0.push(text.into());
        }
    }

    // ── ErrorLatch ───────────────────────────────────────────────────

    #[test]
    fn latch_reports_once_per_episode() {
        let mut rec = Recorder::default();
        let mut latch = ErrorLatch::new(true, &mut rec);

        assert!(latch.record_write(ADDR, Err(ErrorKind::Other)));
        assert!(!latch.record_write(ADDR, Err(ErrorKind::Other)));
        assert_eq!(latch.error(), Some(ErrorKind::Other));

        assert!(!latch.record_write(ADDR, Ok(())));
        assert_eq!(latch.error(), None);

        assert!(latch.record_write(0x21, Err(ErrorKind::Bus)));
        drop(latch);
        assert_eq!(rec.0, ["20", "21"]);
    }

    #[test]
    fn latch_without_check_mode_never_reports_or_blocks() {
        let mut rec = Recorder::default();
        let mut latch = ErrorLatch::new(false, &mut rec);

        assert!(!latch.record_write(ADDR, Err(ErrorKind::Other)));
        assert_eq!(latch.error(), Some(ErrorKind::Other));
        assert!(!latch.blocks_reads());
        drop(latch);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn latch_reset_clears_error_and_sets_policy() {
        let mut latch = ErrorLatch::new(false, NoDiagnostics);
        latch.record_write(ADDR, Err(ErrorKind::Other));

        latch.reset(true);
        assert_eq!(latch.error(), None);
        assert!(latch.check_mode());
        assert!(!latch.blocks_reads());
    }

    #[test]
    fn write_read_failure_is_latched_and_zero_filled() {
        let mut rec = Recorder::default();
        let mut latch = ErrorLatch::new(true, &mut rec);

        let mut buf = [0xAAu8; 2];
        latch.settle_write_read(ADDR, Err(ErrorKind::Other), &mut buf);
        assert_eq!(buf, [0, 0]);
        assert!(latch.blocks_reads());

        let mut buf = [0x12u8, 0x34];
        latch.settle_write_read(ADDR, Ok(()), &mut buf);
        assert_eq!(buf, [0x12, 0x34]);
        assert_eq!(latch.error(), None);

        drop(latch);
        assert_eq!(rec.0, ["20"]);
    }

    // ── Transport ────────────────────────────────────────────────────

    #[test]
    fn read_block_selects_and_reads_with_repeated_start() {
        let expectations = [Transaction::write_read(ADDR, vec![0x03], vec![0x80, 0x40])];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), true, NoDiagnostics);

        let mut buf = [0u8; 2];
        transport.read_block(ADDR, Register::XMsb, &mut buf);
        assert_eq!(buf, [0x80, 0x40]);
        assert_eq!(transport.latch().error(), None);

        i2c.done();
    }

    #[test]
    fn write_register_is_one_transaction() {
        let expectations = [Transaction::write(ADDR, vec![0x08, 0x00])];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), false, NoDiagnostics);

        transport.write_register(ADDR, Register::Status, 0);

        i2c.done();
    }

    #[test]
    fn check_mode_zero_fills_without_bus_traffic() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0; 6]).with_error(ErrorKind::Other),
            // Blocked: only the select write goes out, and it fails again.
            Transaction::write(ADDR, vec![0x03]).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), true, NoDiagnostics);

        let mut buf = [0xAAu8; 6];
        transport.read_block(ADDR, Register::XMsb, &mut buf);
        assert_eq!(buf, [0; 6]);
        assert_eq!(transport.latch().error(), Some(ErrorKind::Other));

        let mut buf = [0xAAu8; 6];
        transport.read_block(ADDR, Register::XMsb, &mut buf);
        assert_eq!(buf, [0; 6]);

        // Direct reads stay blocked too.
        let mut buf = [0xAAu8; 3];
        transport.read_registers(ADDR, &mut buf);
        assert_eq!(buf, [0; 3]);

        i2c.done();
    }

    #[test]
    fn blocked_read_resumes_once_select_succeeds() {
        let expectations = [
            Transaction::write(ADDR, vec![0x08, 0x00]).with_error(ErrorKind::Other),
            Transaction::write(ADDR, vec![0x07]),
            Transaction::read(ADDR, vec![0x01]),
            Transaction::write_read(ADDR, vec![0x07], vec![0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), true, NoDiagnostics);

        transport.write_register(ADDR, Register::Status, 0);
        assert!(transport.latch().blocks_reads());

        assert_eq!(transport.read_register(ADDR, Register::Button), 0x01);
        assert_eq!(transport.latch().error(), None);
        assert_eq!(transport.read_register(ADDR, Register::Button), 0x00);

        i2c.done();
    }

    #[test]
    fn without_check_mode_reads_continue_after_error() {
        let expectations = [
            Transaction::write(ADDR, vec![0x08, 0x00]).with_error(ErrorKind::Other),
            Transaction::write_read(ADDR, vec![0x07], vec![0x01]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), false, NoDiagnostics);

        transport.write_register(ADDR, Register::Status, 0);
        assert_eq!(transport.latch().error(), Some(ErrorKind::Other));
        assert_eq!(transport.read_register(ADDR, Register::Button), 0x01);
        assert_eq!(transport.latch().error(), None);

        i2c.done();
    }

    #[test]
    fn writes_are_attempted_while_error_latched() {
        let expectations = [
            Transaction::write(ADDR, vec![0x08, 0x00]).with_error(ErrorKind::Other),
            Transaction::write(ADDR, vec![0x08, 0x00]).with_error(ErrorKind::Other),
            Transaction::write(ADDR, vec![0x08, 0x00]),
            Transaction::write(ADDR, vec![0x08, 0x00]).with_error(ErrorKind::Bus),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rec = Recorder::default();
        let mut transport = RegisterTransport::new(i2c.clone(), true, &mut rec);

        transport.write_register(ADDR, Register::Status, 0);
        transport.write_register(ADDR, Register::Status, 0);
        transport.write_register(ADDR, Register::Status, 0);
        assert_eq!(transport.latch().error(), None);
        transport.write_register(ADDR, Register::Status, 0);
        assert_eq!(transport.latch().error(), Some(ErrorKind::Bus));

        drop(transport);
        assert_eq!(rec.0, ["20", "20"]);
        i2c.done();
    }

    #[test]
    fn failed_plain_read_yields_zeros_and_leaves_latch_alone() {
        let expectations = [Transaction::read(ADDR, vec![0x12, 0x34]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = RegisterTransport::new(i2c.clone(), true, NoDiagnostics);

        let mut buf = [0xAAu8; 2];
        transport.read_registers(ADDR, &mut buf);
        assert_eq!(buf, [0, 0]);
        assert_eq!(transport.latch().error(), None);

        i2c.done();
    }
}
