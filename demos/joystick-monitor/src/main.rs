//! Joystick monitor demo
//!
//! Polls a Qwiic Joystick on the Raspberry Pi Pico 2 at 20 Hz with the async
//! driver, logs the status line, and logs the packed radio word whenever it
//! changes.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       | Qwiic blue                   |
//! | I2C0 SCL  | GP21       | Qwiic yellow                 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use qwiic_joystick::asynch::Joystick;
use qwiic_joystick::{Config, Deadzone, Range};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

const POLL_PERIOD: Duration = Duration::from_millis(50);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let config = Config::default()
        .with_check_mode(true)
        .with_range(Range::Percent)
        .with_deadzone(Deadzone::symmetric(3));

    // The check-mode report lands in the RTT log.
    let sink = |addr: &str| error!("joystick at 0x{} stopped answering", addr);
    let mut joystick = Joystick::with_diagnostics(i2c, config, sink);

    joystick.begin().await;
    match joystick.last_error() {
        None => info!("Joystick found at {=u8:#04x}", joystick.address()),
        Some(e) => warn!("Joystick did not answer: {}", e),
    }

    let mut last_word = 0u32;

    loop {
        // One burst per poll: STATUS clears on read, so the log line and the
        // radio word must come from the same registers.
        let (sample, frame) = joystick.read_with_frame(None).await;
        if joystick.last_error().is_none() {
            info!(
                "{=str} pressed={=bool}",
                sample.status_line().as_str(),
                sample.is_pressed()
            );
        }

        // The radio word uses raw MSB bytes; a receiver decodes it with
        // `PackedFrame::from_word`.
        let word = frame.to_word();
        if word != last_word {
            debug!("radio word {=u32:#010x}", word);
            last_word = word;
        }

        // After a failure, retry the STATUS clear every poll; a success
        // re-enables reads.
        if joystick.last_error().is_some() {
            joystick.clear_button_status().await;
        }

        Timer::after(POLL_PERIOD).await;
    }
}
