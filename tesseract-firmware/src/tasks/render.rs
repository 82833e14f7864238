//! Render task
//!
//! Drives the visualizer at the configured frame interval. Each iteration
//! steps the simulation, draws into the frame buffer and flushes it to the
//! panel.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Timer};

use tesseract_core::{RngSource, Visualizer};
use tesseract_display::BufferedCanvas;

use crate::ssd1306::Ssd1306;

/// Concrete display stack used by the firmware
pub type Display = BufferedCanvas<Ssd1306<I2c<'static, I2C0, Blocking>>>;

/// Time between FPS log lines
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Render task - runs until the display stops responding
#[embassy_executor::task]
pub async fn render_task(
    mut display: Display,
    mut visualizer: Visualizer,
    mut rng: RngSource<RoscRng>,
) {
    info!("Render task started");

    let interval = Duration::from_millis(visualizer.animation().config().frame_interval_ms as u64);
    let mut last = Instant::now();
    let mut last_log = last;

    loop {
        let now = Instant::now();
        let delta_us = now.duration_since(last).as_micros().min(u32::MAX as u64) as u32;
        last = now;

        let report = match visualizer.frame(&mut display, &mut rng, delta_us) {
            Ok(report) => report,
            Err(e) => {
                error!("Display write failed: {:?}, stopping render loop", e);
                return;
            }
        };

        if report.clamped > 0 {
            warn!(
                "Frame {}: {} projection(s) clamped near the camera plane",
                report.frame, report.clamped
            );
        }
        if report.glitch {
            trace!("Frame {}: glitch burst", report.frame);
        }
        if now.duration_since(last_log) >= FPS_LOG_INTERVAL {
            last_log = now;
            debug!(
                "Frame {}: {} fps, {} particles on screen, {} respawned",
                report.frame, report.fps, report.particle_pixels, report.respawned
            );
        }

        Timer::after(interval).await;
    }
}
