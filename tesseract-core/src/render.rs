//! Frame rendering
//!
//! Turns one animation frame into draw calls on a [`Canvas`]:
//! clear, particles, hypercube edges, FPS text, glitch strokes, present.

use core::fmt::Write;

use heapless::String;
use tesseract_display::{Canvas, DisplayError};

use crate::config::VisualizerConfig;
use crate::geometry::{Edge, Vec2};
use crate::glitch::GlitchBurst;
use crate::particles::Particle;
use crate::projection::{project, Viewport};

/// Everything drawn in one frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Rotated and projected hypercube vertices, unit scale
    pub vertices: &'a [Vec2],
    pub edges: &'a [Edge],
    pub particles: &'a [Particle],
    pub fps: u32,
    pub glitch: Option<&'a GlitchBurst>,
}

/// Per-frame rendering counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    /// Particles that landed on screen
    pub particle_pixels: usize,
    /// Particle projections whose divisor had to be clamped
    pub clamped: usize,
}

/// Draws scenes with a fixed camera and viewport
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    viewport: Viewport,
    camera_distance: f32,
    fps_position: (i32, i32),
}

impl FrameRenderer {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            viewport: config.viewport,
            camera_distance: config.camera_distance,
            fps_position: config.fps_position,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Draw and present one frame
    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        scene: &Scene<'_>,
    ) -> Result<RenderStats, DisplayError> {
        let mut stats = RenderStats::default();

        canvas.clear()?;

        // Particles are 3D; lift them with w = 0 and reuse the 4D pipeline
        for particle in scene.particles {
            let projected = project(particle.position.extend(0.0), self.camera_distance);
            if projected.clamped {
                stats.clamped += 1;
            }
            let (x, y) = self.viewport.to_screen(projected.point);
            if self.viewport.contains(x, y) {
                canvas.set_pixel(x, y, true)?;
                stats.particle_pixels += 1;
            }
        }

        for edge in scene.edges {
            let (x0, y0) = self.viewport.to_screen(scene.vertices[edge.a as usize]);
            let (x1, y1) = self.viewport.to_screen(scene.vertices[edge.b as usize]);
            canvas.draw_line(x0, y0, x1, y1, true)?;
        }

        let mut text: String<16> = String::new();
        // "FPS: " plus at most 10 digits always fits
        let _ = write!(text, "FPS: {}", scene.fps);
        canvas.draw_text(self.fps_position.0, self.fps_position.1, &text)?;

        if let Some(burst) = scene.glitch {
            for s in burst.segments() {
                canvas.draw_line(s.x0, s.y0, s.x1, s.y1, true)?;
            }
        }

        canvas.present()?;
        Ok(stats)
    }
}
