//! Animation state and frame stepping
//!
//! [`Animation::step`] is the pure part of the render loop: it advances
//! the base angle, the particle field and the glitch decision, and
//! projects the hypercube. It holds no timing and does no I/O, so a single
//! frame can be reproduced from a state and a random source.
//!
//! [`Visualizer`] is the thin harness the firmware calls once per frame.

use tesseract_display::{Canvas, DisplayError};

use crate::config::VisualizerConfig;
use crate::fps::FpsCounter;
use crate::geometry::{Tesseract, Vec2, VERTEX_COUNT};
use crate::glitch::GlitchBurst;
use crate::particles::{ParticleSystem, DEFAULT_PARTICLE_COUNT};
use crate::projection::project;
use crate::random::RandomSource;
use crate::render::{FrameRenderer, Scene};
use crate::rotation::{rotate, RotationAngles};

/// Mutable loop state
#[derive(Debug, Clone)]
pub struct SimulationState<const N: usize = DEFAULT_PARTICLE_COUNT> {
    /// Monotonically increasing base rotation angle
    pub base_angle: f32,
    /// Frames stepped so far
    pub frame: u64,
    pub particles: ParticleSystem<N>,
}

impl<const N: usize> SimulationState<N> {
    /// Fresh state at angle zero with a newly seeded particle field
    pub fn new<R: RandomSource>(config: &VisualizerConfig, rng: &mut R) -> Self {
        Self::with_particles(ParticleSystem::new(config.particles, rng))
    }

    /// State at angle zero around an existing particle pool
    pub fn with_particles(particles: ParticleSystem<N>) -> Self {
        Self {
            base_angle: 0.0,
            frame: 0,
            particles,
        }
    }

    /// Rotation angles for the current base angle
    pub fn angles(&self) -> RotationAngles {
        RotationAngles::from_base(self.base_angle)
    }
}

/// Output of one simulation step
#[derive(Debug, Clone)]
pub struct Frame {
    /// Projected hypercube vertices, unit scale
    pub vertices: [Vec2; VERTEX_COUNT],
    /// Glitch burst to overlay, if this frame glitches
    pub glitch: Option<GlitchBurst>,
    /// Particles respawned during this step
    pub respawned: usize,
    /// Vertex projections whose divisor had to be clamped
    pub clamped: usize,
}

/// Per-frame diagnostics for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    pub frame: u64,
    pub fps: u32,
    pub respawned: usize,
    /// Clamped projections, vertices and particles together
    pub clamped: usize,
    pub particle_pixels: usize,
    pub glitch: bool,
}

/// Static part of the animation: mesh and parameters
#[derive(Debug, Clone)]
pub struct Animation {
    tesseract: Tesseract,
    config: VisualizerConfig,
}

impl Animation {
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            tesseract: Tesseract::new(),
            config,
        }
    }

    pub fn tesseract(&self) -> &Tesseract {
        &self.tesseract
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Advance the simulation by one frame
    pub fn step<R: RandomSource, const N: usize>(
        &self,
        mut state: SimulationState<N>,
        rng: &mut R,
    ) -> (SimulationState<N>, Frame) {
        let frame = self.advance(&mut state, rng);
        (state, frame)
    }

    /// In-place form of [`Animation::step`]
    pub fn advance<R: RandomSource, const N: usize>(
        &self,
        state: &mut SimulationState<N>,
        rng: &mut R,
    ) -> Frame {
        state.base_angle += self.config.angle_step;
        state.frame += 1;

        let respawned = state.particles.update(rng);

        let angles = state.angles();
        let mut clamped = 0;
        let mut vertices = [Vec2::default(); VERTEX_COUNT];
        for (out, vertex) in vertices.iter_mut().zip(self.tesseract.vertices()) {
            let projected = project(
                rotate(vertex.to_point(), &angles),
                self.config.camera_distance,
            );
            if projected.clamped {
                clamped += 1;
            }
            *out = projected.point;
        }

        let viewport = &self.config.viewport;
        let glitch = GlitchBurst::roll(&self.config.glitch, viewport.width, viewport.height, rng);

        Frame {
            vertices,
            glitch,
            respawned,
            clamped,
        }
    }
}

/// One-call-per-frame driver around [`Animation`]
pub struct Visualizer<const N: usize = DEFAULT_PARTICLE_COUNT> {
    animation: Animation,
    renderer: FrameRenderer,
    state: SimulationState<N>,
    fps: FpsCounter,
}

impl<const N: usize> Visualizer<N> {
    pub fn new<R: RandomSource>(config: VisualizerConfig, rng: &mut R) -> Self {
        let state = SimulationState::new(&config, rng);
        Self::with_state(config, state)
    }

    /// Start from a prepared state
    pub fn with_state(config: VisualizerConfig, state: SimulationState<N>) -> Self {
        Self {
            renderer: FrameRenderer::new(&config),
            animation: Animation::new(config),
            state,
            fps: FpsCounter::new(),
        }
    }

    pub fn state(&self) -> &SimulationState<N> {
        &self.state
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Step, render and present one frame
    ///
    /// `delta_us` is the wall-clock time since the previous call; it only
    /// feeds the FPS counter.
    pub fn frame<C: Canvas, R: RandomSource>(
        &mut self,
        canvas: &mut C,
        rng: &mut R,
        delta_us: u32,
    ) -> Result<FrameReport, DisplayError> {
        self.fps.record(delta_us);

        let frame = self.animation.advance(&mut self.state, rng);

        let scene = Scene {
            vertices: &frame.vertices,
            edges: self.animation.tesseract().edges(),
            particles: self.state.particles.particles(),
            fps: self.fps.fps(),
            glitch: frame.glitch.as_ref(),
        };
        let stats = self.renderer.render(canvas, &scene)?;

        Ok(FrameReport {
            frame: self.state.frame,
            fps: scene.fps,
            respawned: frame.respawned,
            clamped: frame.clamped + stats.clamped,
            particle_pixels: stats.particle_pixels,
            glitch: frame.glitch.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlitchConfig, ParticleConfig};
    use crate::geometry::{Vec3, EDGE_COUNT};
    use crate::particles::Particle;
    use crate::random::testing::ScriptedRandom;
    use crate::random::RngSource;
    use crate::render::testing::{DrawCall, RecordingCanvas};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> VisualizerConfig {
        VisualizerConfig {
            glitch: GlitchConfig {
                probability: 0.0,
                ..GlitchConfig::default()
            },
            ..VisualizerConfig::default()
        }
    }

    fn idle_state() -> SimulationState<1> {
        let particle = Particle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life: 1_000,
        };
        SimulationState::with_particles(ParticleSystem::from_particles(
            [particle],
            ParticleConfig::default(),
        ))
    }

    #[test]
    fn test_base_angle_after_ten_frames() {
        let animation = Animation::new(quiet_config());
        let mut rng = ScriptedRandom::constant(0.5);
        let mut state = idle_state();
        assert_eq!(state.base_angle, 0.0);

        for _ in 0..10 {
            state = animation.step(state, &mut rng).0;
        }
        assert_eq!(state.frame, 10);
        assert!((state.base_angle - 0.2).abs() < 1e-5);
        assert!((state.angles().xz - 0.14).abs() < 1e-5);
    }

    #[test]
    fn test_step_projects_rotated_vertices() {
        let animation = Animation::new(quiet_config());
        let mut rng = ScriptedRandom::constant(0.5);
        let (state, frame) = animation.step(idle_state(), &mut rng);

        let angles = RotationAngles::from_base(state.base_angle);
        let last = animation.tesseract().vertices()[15].to_point();
        let expected = project(rotate(last, &angles), 3.0).point;
        assert_eq!(frame.vertices[15], expected);
        assert_eq!(frame.clamped, 0);
        assert!(frame.glitch.is_none());
    }

    #[test]
    fn test_unrotated_vertex_projection() {
        // At base angle zero vertex (1,1,1,1) lands at (3, 3)
        let config = VisualizerConfig {
            angle_step: 0.0,
            ..quiet_config()
        };
        let animation = Animation::new(config);
        let mut rng = ScriptedRandom::constant(0.5);
        let (_, frame) = animation.step(idle_state(), &mut rng);
        assert!((frame.vertices[15].x - 3.0).abs() < 1e-5);
        assert!((frame.vertices[15].y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_step_is_deterministic() {
        let animation = Animation::new(VisualizerConfig::default());
        let mut rng_a = RngSource::new(StdRng::seed_from_u64(77));
        let mut rng_b = RngSource::new(StdRng::seed_from_u64(77));
        let mut a: SimulationState = SimulationState::new(animation.config(), &mut rng_a);
        let mut b: SimulationState = SimulationState::new(animation.config(), &mut rng_b);

        for _ in 0..50 {
            let (next_a, frame_a) = animation.step(a, &mut rng_a);
            let (next_b, frame_b) = animation.step(b, &mut rng_b);
            assert_eq!(frame_a.vertices, frame_b.vertices);
            assert_eq!(frame_a.glitch, frame_b.glitch);
            assert_eq!(next_a.particles.particles(), next_b.particles.particles());
            a = next_a;
            b = next_b;
        }
    }

    #[test]
    fn test_glitch_rolled_once_per_frame() {
        let config = VisualizerConfig {
            glitch: GlitchConfig {
                probability: 1.0,
                segments: 2,
                max_length: 5,
            },
            ..VisualizerConfig::default()
        };
        let animation = Animation::new(config);
        let mut rng = ScriptedRandom::constant(0.5);
        let (_, frame) = animation.step(idle_state(), &mut rng);
        // Particle stayed alive, so every draw went to the glitch
        assert_eq!(rng.draws(), 1 + 2 * 4);
        assert_eq!(frame.glitch.unwrap().segments().len(), 2);
    }

    #[test]
    fn test_expired_particle_respawns_during_step() {
        let animation = Animation::new(quiet_config());
        let particle = Particle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life: 1,
        };
        let state = SimulationState::with_particles(ParticleSystem::from_particles(
            [particle],
            ParticleConfig::default(),
        ));
        let mut rng = ScriptedRandom::constant(0.9);
        let (state, frame) = animation.step(state, &mut rng);

        assert_eq!(frame.respawned, 1);
        let p = state.particles.particles()[0];
        assert!(p.life > 0);
        assert!(p.position.max_abs() <= 1.0);
    }

    #[test]
    fn test_visualizer_frame() {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut visualizer = Visualizer::with_state(quiet_config(), idle_state());
        let mut canvas = RecordingCanvas::default();

        let report = visualizer.frame(&mut canvas, &mut rng, 20_000).unwrap();
        assert_eq!(report.frame, 1);
        assert_eq!(report.fps, 50);
        assert_eq!(report.respawned, 0);
        assert_eq!(report.particle_pixels, 1);
        assert!(!report.glitch);

        assert_eq!(canvas.calls.first(), Some(&DrawCall::Clear));
        assert_eq!(canvas.calls.last(), Some(&DrawCall::Present));
        assert_eq!(
            canvas.count(|c| matches!(c, DrawCall::Line(..))),
            EDGE_COUNT
        );
        assert!(canvas.calls.contains(&DrawCall::Text(0, 0, "FPS: 50".into())));
        assert_eq!(visualizer.state().frame, 1);
    }

    #[test]
    fn test_visualizer_propagates_display_error() {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut visualizer = Visualizer::with_state(quiet_config(), idle_state());
        let mut canvas = RecordingCanvas {
            fail_present: true,
            ..RecordingCanvas::default()
        };

        assert_eq!(
            visualizer.frame(&mut canvas, &mut rng, 10_000),
            Err(DisplayError::Communication)
        );
        // The simulation still advanced
        assert_eq!(visualizer.state().frame, 1);
    }

    #[test]
    fn test_visualizer_runs_many_frames() {
        let mut rng = RngSource::new(StdRng::seed_from_u64(2024));
        let mut visualizer: Visualizer = Visualizer::new(VisualizerConfig::default(), &mut rng);
        let mut canvas = RecordingCanvas::default();

        for _ in 0..1_000 {
            let report = visualizer.frame(&mut canvas, &mut rng, 10_000).unwrap();
            assert!(report.particle_pixels <= DEFAULT_PARTICLE_COUNT);
            canvas.calls.clear();
        }
        assert_eq!(visualizer.state().frame, 1_000);
        assert!((visualizer.state().base_angle - 20.0).abs() < 0.05);
    }
}
