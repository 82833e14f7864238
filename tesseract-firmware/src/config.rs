//! Configuration loading
//!
//! The configuration is compiled into the firmware from visualizer.toml
//! (validated by build.rs) and parsed once at startup.

use defmt::*;

use tesseract_core::config::parse_config;
use tesseract_core::VisualizerConfig;

/// Embedded configuration (compiled into firmware)
/// Edit visualizer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../visualizer.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load_config() -> VisualizerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: distance={}, scale={}, step={} rad, interval={}ms",
                config.camera_distance,
                config.viewport.scale,
                config.angle_step,
                config.frame_interval_ms
            );
            config
        }
        Err(e) => {
            warn!("Failed to parse visualizer.toml: {:?}, using defaults", e);
            VisualizerConfig::default()
        }
    }
}
