//! Board-agnostic core logic for the hypercube visualizer
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - Hypercube geometry (vertices, edges)
//! - 4D plane rotations and perspective projection
//! - Particle field simulation
//! - Per-frame glitch overlay and FPS measurement
//! - Frame rendering against a `tesseract_display::Canvas`
//! - Animation state and the pure frame step
//! - Configuration types and the TOML subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod fps;
pub mod geometry;
pub mod glitch;
pub mod particles;
pub mod projection;
pub mod random;
pub mod render;
pub mod rotation;

pub use animation::{Animation, Frame, FrameReport, SimulationState, Visualizer};
pub use config::VisualizerConfig;
pub use geometry::{Edge, Tesseract, Vec2, Vec3, Vec4, Vertex};
pub use random::{RandomSource, RngSource};
pub use rotation::RotationAngles;
