//! Configuration type definitions

use crate::projection::{Viewport, DEFAULT_CAMERA_DISTANCE};

/// Largest supported glitch burst
pub const MAX_GLITCH_SEGMENTS: usize = 16;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Camera distance must be positive
    InvalidCameraDistance,
    /// Viewport scale must be positive and dimensions non-zero
    InvalidViewport,
    /// Spawn extents, speed or bound out of range
    InvalidParticleBounds,
    /// Lifetime range empty or non-positive
    InvalidLifetime,
    /// Probability outside 0..=1
    InvalidProbability,
    /// Too many glitch segments or zero segment length
    InvalidGlitch,
    /// Frame interval must be non-zero
    InvalidFrameInterval,
}

/// Particle field parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleConfig {
    /// Half-width of the cube particles are first seeded in
    pub spawn_extent: f32,
    /// Half-width of the cube particles respawn in
    pub respawn_extent: f32,
    /// Maximum velocity per axis, per frame
    pub max_speed: f32,
    /// Shortest lifetime in frames
    pub life_min: i32,
    /// Longest lifetime in frames
    pub life_max: i32,
    /// A particle respawns once any |coordinate| exceeds this
    pub bound: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            spawn_extent: 2.0,
            respawn_extent: 1.0,
            max_speed: 0.02,
            life_min: 50,
            life_max: 200,
            bound: 3.0,
        }
    }
}

/// Glitch overlay parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlitchConfig {
    /// Chance per frame of drawing a burst
    pub probability: f32,
    /// Segments per burst
    pub segments: u8,
    /// Longest segment extent along each axis, in pixels
    pub max_length: u8,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            probability: 0.05,
            segments: 10,
            max_length: 5,
        }
    }
}

/// Complete visualizer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualizerConfig {
    /// Camera distance for both perspective divides
    pub camera_distance: f32,
    /// Projection-to-pixel mapping
    pub viewport: Viewport,
    /// Particle field
    pub particles: ParticleConfig,
    /// Base angle increment per frame, in radians
    pub angle_step: f32,
    /// Sleep between frames
    pub frame_interval_ms: u32,
    /// Glitch overlay
    pub glitch: GlitchConfig,
    /// Top-left corner of the FPS text
    pub fps_position: (i32, i32),
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            viewport: Viewport::default(),
            particles: ParticleConfig::default(),
            angle_step: 0.02,
            frame_interval_ms: 10,
            glitch: GlitchConfig::default(),
            fps_position: (0, 0),
        }
    }
}

impl VisualizerConfig {
    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.camera_distance > 0.0) {
            return Err(ConfigError::InvalidCameraDistance);
        }

        let viewport = &self.viewport;
        if !(viewport.scale > 0.0) || viewport.width == 0 || viewport.height == 0 {
            return Err(ConfigError::InvalidViewport);
        }

        let particles = &self.particles;
        if !(particles.spawn_extent > 0.0)
            || !(particles.respawn_extent > 0.0)
            || !(particles.max_speed >= 0.0)
            || !(particles.bound > particles.respawn_extent)
        {
            return Err(ConfigError::InvalidParticleBounds);
        }
        if particles.life_min <= 0 || particles.life_max < particles.life_min {
            return Err(ConfigError::InvalidLifetime);
        }

        if !(0.0..=1.0).contains(&self.glitch.probability) {
            return Err(ConfigError::InvalidProbability);
        }
        if self.glitch.segments as usize > MAX_GLITCH_SEGMENTS || self.glitch.max_length == 0 {
            return Err(ConfigError::InvalidGlitch);
        }

        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }

        Ok(())
    }
}
