//! Diagnostic output for check-mode.
//!
//! When check-mode is enabled, the first failed write of an error episode
//! reports the device address as two lowercase hex digits (e.g. `"20"`).
//! Where that text goes is up to the application: an LED matrix, a serial
//! console, a log line.

use core::fmt::Write;

use heapless::String;

/// Receives the one-shot failure report.
pub trait DiagnosticSink {
    fn show(&mut self, text: &str);
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn show(&mut self, _text: &str) {}
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&str),
{
    fn show(&mut self, text: &str) {
        self(text)
    }
}

/// Address formatted the way it is reported: two lowercase hex digits.
pub fn hex_address(address: u8) -> String<2> {
    let mut text = String::new();
    let _ = write!(text, "{:02x}", address);
    text
}
