//! Packing joystick state into 32-bit words for a radio link.
//!
//! Two independent helpers live here:
//!
//! - [`PackedFrame`] — the fixed layout produced by `read_packed()`:
//!   `[H MSB, V MSB, button (or override), status]`, little-endian.
//! - [`TransmitBuffer`] — a general 4-byte scratch buffer that accepts
//!   numbers in any [`NumberFormat`] at any offset and reads back as one
//!   little-endian `u32`.

use crate::button::{decode_pressed, decode_was_pressed};
use crate::error::JoystickError;
use crate::registers::{BURST_BUTTON, BURST_LEN, BURST_STATUS, BURST_X_MSB, BURST_Y_MSB};

// ── PackedFrame ──────────────────────────────────────────────────────────

/// Four one-byte channels sent as a single `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedFrame {
    /// Coarse horizontal position (X MSB register).
    pub horizontal: u8,
    /// Coarse vertical position (Y MSB register).
    pub vertical: u8,
    /// Raw BUTTON byte, or the caller's override.
    pub button: u8,
    /// Raw STATUS byte.
    pub status: u8,
}

impl PackedFrame {
    /// Build a frame from a 6-byte burst starting at X MSB.
    ///
    /// `override_byte` replaces the BUTTON channel when given.
    pub fn from_burst(burst: &[u8; BURST_LEN], override_byte: Option<u8>) -> Self {
        Self {
            horizontal: burst[BURST_X_MSB],
            vertical: burst[BURST_Y_MSB],
            button: override_byte.unwrap_or(burst[BURST_BUTTON]),
            status: burst[BURST_STATUS],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.horizontal, self.vertical, self.button, self.status]
    }

    /// Little-endian word: byte 0 is `horizontal`, byte 3 is `status`.
    pub const fn to_word(self) -> u32 {
        u32::from_le_bytes(self.to_bytes())
    }

    /// Unpack a word received over the link.
    pub const fn from_word(word: u32) -> Self {
        let [horizontal, vertical, button, status] = word.to_le_bytes();
        Self { horizontal, vertical, button, status }
    }

    /// Button channel decoded as a live button level. Meaningless when the
    /// sender used an override byte.
    pub const fn is_pressed(self) -> bool {
        decode_pressed(self.button)
    }

    pub const fn was_pressed(self) -> bool {
        decode_was_pressed(self.status)
    }
}

// ── NumberFormat ─────────────────────────────────────────────────────────

/// Byte width, signedness and byte order of a number in a [`TransmitBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumberFormat {
    Int8LE,
    UInt8LE,
    Int16LE,
    UInt16LE,
    Int32LE,
    UInt32LE,
    Int8BE,
    UInt8BE,
    Int16BE,
    UInt16BE,
    Int32BE,
    UInt32BE,
    Float32LE,
    Float32BE,
}

impl NumberFormat {
    /// Size of the encoded value in bytes.
    pub const fn width(self) -> usize {
        use NumberFormat::*;
        match self {
            Int8LE | UInt8LE | Int8BE | UInt8BE => 1,
            Int16LE | UInt16LE | Int16BE | UInt16BE => 2,
            Int32LE | UInt32LE | Int32BE | UInt32BE | Float32LE | Float32BE => 4,
        }
    }

    const fn is_big_endian(self) -> bool {
        use NumberFormat::*;
        matches!(
            self,
            Int8BE | UInt8BE | Int16BE | UInt16BE | Int32BE | UInt32BE | Float32BE
        )
    }

    /// Encode `value` into `out`, which must be exactly `width()` bytes.
    ///
    /// Integer formats truncate toward zero, then wrap to the field width.
    /// Non-finite values encode as zero for integer formats.
    fn encode(self, value: f64, out: &mut [u8]) {
        let be = self.is_big_endian();
        match self {
            NumberFormat::Float32LE | NumberFormat::Float32BE => {
                let v = value as f32;
                out.copy_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
            }
            _ => {
                // `as` saturates and maps NaN to 0; the narrowing casts below
                // then keep only the low bytes.
                let v = value as i64;
                match self.width() {
                    1 => out[0] = v as u8,
                    2 => {
                        let v = v as u16;
                        out.copy_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
                    }
                    _ => {
                        let v = v as u32;
                        out.copy_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
                    }
                }
            }
        }
    }
}

// ── TransmitBuffer ───────────────────────────────────────────────────────

/// 4-byte staging buffer for a transmission word.
///
/// Starts zeroed. Bytes keep their value until overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitBuffer {
    bytes: [u8; 4],
}

impl TransmitBuffer {
    pub const LEN: usize = 4;

    pub const fn new() -> Self {
        Self { bytes: [0; 4] }
    }

    /// Write `value` in `format` starting at byte `offset`.
    ///
    /// Returns [`JoystickError::OutOfRange`] and leaves the buffer untouched
    /// if the value would extend past byte 3.
    pub fn set(
        &mut self,
        format: NumberFormat,
        offset: usize,
        value: f64,
    ) -> Result<(), JoystickError> {
        let width = format.width();
        let end = offset
            .checked_add(width)
            .filter(|end| *end <= Self::LEN)
            .ok_or(JoystickError::OutOfRange { offset, width })?;

        format.encode(value, &mut self.bytes[offset..end]);
        Ok(())
    }

    /// Shorthand for a single unsigned byte.
    pub fn set_u8(&mut self, offset: usize, value: u8) -> Result<(), JoystickError> {
        self.set(NumberFormat::UInt8LE, offset, value as f64)
    }

    /// Whole buffer as a little-endian `u32`.
    pub const fn get(&self) -> u32 {
        u32::from_le_bytes(self.bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.bytes
    }
}
