//! Tesseract Visualizer Firmware
//!
//! Firmware for an RP2040 board driving a 128x64 SSD1306 OLED over I2C.
//! Renders a rotating 4D hypercube with a drifting particle field.

#![no_std]
#![no_main]

mod config;
mod ssd1306;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use tesseract_core::{RngSource, Visualizer};
use tesseract_display::BufferedCanvas;

use crate::ssd1306::Ssd1306;

/// OLED bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tesseract Visualizer starting...");

    let p = embassy_rp::init(Default::default());

    // Load configuration before touching the display
    let config = config::load_config();

    // Setup I2C0 for OLED (GPIO5=SCL, GPIO4=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut display = BufferedCanvas::new(Ssd1306::new(i2c));
    if let Err(e) = display.init() {
        error!("Display init failed: {:?}", e);
        return;
    }
    info!("Display initialized");

    // Ring oscillator jitter seeds the particle field and glitch rolls
    let mut rng = RngSource::new(RoscRng);
    let visualizer = Visualizer::new(config, &mut rng);
    info!("Visualizer ready, {} edges", visualizer.animation().tesseract().edges().len());

    spawner
        .spawn(tasks::render_task(display, visualizer, rng))
        .unwrap();

    info!("Render task spawned, firmware running");
}
