//! Pluggable randomness
//!
//! Everything random in the animation (particle spawning, the glitch
//! overlay) draws from a [`RandomSource`] passed in by the caller. Firmware
//! wraps a hardware generator in [`RngSource`]; tests can script exact
//! sequences.

use rand_core::RngCore;

/// Source of uniformly distributed values
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[lo, hi)`
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Uniform integer in `[lo, hi]`
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as f32 + 1.0;
        let offset = (self.next_unit() * span) as i32;
        lo + offset.min(hi - lo)
    }

    /// `true` with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }
}

/// Adapter from any `rand_core` generator
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        // 24 random bits fill an f32 mantissa exactly
        (self.rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Replays a fixed list of unit values, cycling when exhausted
    pub struct ScriptedRandom {
        values: Vec<f32>,
        cursor: usize,
    }

    impl ScriptedRandom {
        pub fn new(values: &[f32]) -> Self {
            Self {
                values: values.to_vec(),
                cursor: 0,
            }
        }

        /// Always returns the same value
        pub fn constant(value: f32) -> Self {
            Self::new(&[value])
        }

        pub fn draws(&self) -> usize {
            self.cursor
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_unit(&mut self) -> f32 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }
}
