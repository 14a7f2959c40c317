//! Driver for the SparkFun Qwiic Joystick.
//!
//! The joystick is a small microcontroller that samples a two-axis analog
//! stick and a push-button and exposes the results in a register map over I2C
//! (default address `0x20`).
//!
//! # Architecture
//!
//! - **`transport`** — register reads and writes with a latched error state.
//!   Bus errors are never returned; they are latched and, with check-mode on,
//!   reported once per error episode and turn later reads into zeros.
//! - **`codec`**, **`range`**, **`deadzone`** — raw bytes to one of four
//!   output scales, with an optional band around the rest position.
//! - **`button`** — BUTTON/STATUS register decoding.
//! - **`packer`** — four one-byte channels in one little-endian `u32` for a
//!   radio link, plus a general 4-byte [`TransmitBuffer`].
//! - **[`Joystick`]** (public) — the caller-owned session tying it together.
//!
//! # Quick start
//!
//! ```no_run
//! use qwiic_joystick::{Config, Deadzone, Joystick, Range};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) {
//! let mut joystick = Joystick::new(i2c, Config::default());
//! joystick.begin();
//!
//! let sample = joystick.read_sample(Range::Full, Some(Deadzone::symmetric(10)));
//! let word = joystick.read_packed(None);
//! # }
//! ```
//!
//! # Features
//!
//! - **`async`** — [`asynch::Joystick`] over `embedded-hal-async`.
//! - **`defmt`** — [`defmt::Format`] implementations and transport logging.

#![cfg_attr(not(test), no_std)]

pub use button::ButtonQuery;
pub use config::Config;
pub use deadzone::{normalize, Deadzone};
pub use diagnostics::{DiagnosticSink, NoDiagnostics};
pub use error::{error_code, JoystickError};
pub use joystick::Joystick;
pub use packer::{NumberFormat, PackedFrame, TransmitBuffer};
pub use range::Range;
pub use registers::{Register, DEFAULT_ADDRESS};
pub use sample::{Sample, STATUS_LINE_LEN};

pub use embedded_hal::i2c::ErrorKind;

#[cfg(feature = "async")]
pub mod asynch;
pub mod button;
pub mod codec;
mod config;
pub mod deadzone;
pub mod diagnostics;
mod error;
mod joystick;
pub mod packer;
pub mod range;
pub mod registers;
mod sample;
pub mod transport;
