//! Glitch overlay
//!
//! Occasionally a burst of short random strokes is drawn over the frame.
//! The decision is rolled once per frame by the animation step, so it is
//! reproducible for a given random source.

use heapless::Vec;

use crate::config::{GlitchConfig, MAX_GLITCH_SEGMENTS};
use crate::random::RandomSource;

/// Single glitch stroke in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlitchSegment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// Strokes drawn in one glitch frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlitchBurst {
    segments: Vec<GlitchSegment, MAX_GLITCH_SEGMENTS>,
}

impl GlitchBurst {
    /// Decide whether this frame glitches and, if so, generate the burst
    ///
    /// Strokes start anywhere on a `width` x `height` screen and extend
    /// 1..=`max_length` pixels right and down.
    pub fn roll<R: RandomSource>(
        config: &GlitchConfig,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Option<Self> {
        if !rng.chance(config.probability) {
            return None;
        }

        let max_length = i32::from(config.max_length.max(1));
        let count = (config.segments as usize).min(MAX_GLITCH_SEGMENTS);
        let mut segments = Vec::new();
        for _ in 0..count {
            let x0 = rng.range_inclusive(0, width as i32 - 1);
            let y0 = rng.range_inclusive(0, height as i32 - 1);
            let x1 = x0 + rng.range_inclusive(1, max_length);
            let y1 = y0 + rng.range_inclusive(1, max_length);
            // count is capped at capacity
            let _ = segments.push(GlitchSegment { x0, y0, x1, y1 });
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[GlitchSegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;
    use crate::random::RngSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_glitch_above_probability() {
        let mut rng = ScriptedRandom::constant(0.06);
        assert!(GlitchBurst::roll(&GlitchConfig::default(), 128, 64, &mut rng).is_none());
        // Only the decision was drawn
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_glitch_burst_shape() {
        let mut rng = ScriptedRandom::new(&[0.01, 0.5]);
        let burst = GlitchBurst::roll(&GlitchConfig::default(), 128, 64, &mut rng).unwrap();
        assert_eq!(burst.segments().len(), 10);
        assert_eq!(rng.draws(), 1 + 10 * 4);
    }

    #[test]
    fn test_segment_bounds() {
        let config = GlitchConfig {
            probability: 1.0,
            ..GlitchConfig::default()
        };
        let mut rng = RngSource::new(StdRng::seed_from_u64(5));
        for _ in 0..200 {
            let burst = GlitchBurst::roll(&config, 128, 64, &mut rng).unwrap();
            for s in burst.segments() {
                assert!((0..=127).contains(&s.x0));
                assert!((0..=63).contains(&s.y0));
                assert!((1..=5).contains(&(s.x1 - s.x0)));
                assert!((1..=5).contains(&(s.y1 - s.y0)));
            }
        }
    }

    #[test]
    fn test_zero_probability_never_glitches() {
        let config = GlitchConfig {
            probability: 0.0,
            ..GlitchConfig::default()
        };
        let mut rng = ScriptedRandom::constant(0.0);
        assert!(GlitchBurst::roll(&config, 128, 64, &mut rng).is_none());
    }
}
