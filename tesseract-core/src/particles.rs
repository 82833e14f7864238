//! Ambient particle field
//!
//! A fixed pool of independent particles drifting through the scene.
//! Slots are never reallocated: an expired or escaped particle is
//! respawned in place.

use crate::config::ParticleConfig;
use crate::geometry::Vec3;
use crate::random::RandomSource;

/// Default pool size
pub const DEFAULT_PARTICLE_COUNT: usize = 20;

/// Single particle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining frames
    pub life: i32,
}

impl Particle {
    /// Advance one frame
    pub fn step(&mut self) {
        self.position += self.velocity;
        self.life -= 1;
    }

    /// Check whether the particle has expired or left the simulation cube
    pub fn needs_respawn(&self, bound: f32) -> bool {
        self.life <= 0 || self.position.max_abs() > bound
    }
}

/// Fixed-size particle pool
#[derive(Debug, Clone)]
pub struct ParticleSystem<const N: usize = DEFAULT_PARTICLE_COUNT> {
    particles: [Particle; N],
    config: ParticleConfig,
}

impl<const N: usize> ParticleSystem<N> {
    /// Seed every slot within the (wider) initial spawn cube
    pub fn new<R: RandomSource>(config: ParticleConfig, rng: &mut R) -> Self {
        let particles =
            core::array::from_fn(|_| Self::spawn(&config, config.spawn_extent, rng));
        Self { particles, config }
    }

    /// Build a pool from explicit particles
    pub fn from_particles(particles: [Particle; N], config: ParticleConfig) -> Self {
        Self { particles, config }
    }

    fn spawn<R: RandomSource>(config: &ParticleConfig, extent: f32, rng: &mut R) -> Particle {
        let speed = config.max_speed;
        Particle {
            position: Vec3::new(
                rng.uniform(-extent, extent),
                rng.uniform(-extent, extent),
                rng.uniform(-extent, extent),
            ),
            velocity: Vec3::new(
                rng.uniform(-speed, speed),
                rng.uniform(-speed, speed),
                rng.uniform(-speed, speed),
            ),
            life: rng.range_inclusive(config.life_min, config.life_max),
        }
    }

    fn respawn_slot<R: RandomSource>(
        config: &ParticleConfig,
        particle: &mut Particle,
        rng: &mut R,
    ) {
        *particle = Self::spawn(config, config.respawn_extent, rng);
    }

    /// Overwrite a particle with a fresh one inside the respawn cube
    pub fn respawn<R: RandomSource>(&self, particle: &mut Particle, rng: &mut R) {
        Self::respawn_slot(&self.config, particle, rng);
    }

    /// Step every particle and respawn the ones that expired or escaped
    ///
    /// Returns the number of respawned particles.
    pub fn update<R: RandomSource>(&mut self, rng: &mut R) -> usize {
        let config = self.config;
        let mut respawned = 0;
        for particle in self.particles.iter_mut() {
            particle.step();
            if particle.needs_respawn(config.bound) {
                Self::respawn_slot(&config, particle, rng);
                respawned += 1;
            }
        }
        respawned
    }

    pub fn particles(&self) -> &[Particle; N] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}
