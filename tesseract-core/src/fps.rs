//! Frame rate measurement
//!
//! Averages the most recent frame deltas instead of dividing by the time
//! since boot.

use heapless::HistoryBuffer;

/// Number of frame deltas averaged
pub const FPS_WINDOW: usize = 16;

/// Rolling frames-per-second counter
#[derive(Debug, Clone)]
pub struct FpsCounter {
    deltas_us: HistoryBuffer<u32, FPS_WINDOW>,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub const fn new() -> Self {
        Self {
            deltas_us: HistoryBuffer::new(),
        }
    }

    /// Record the time taken by one frame, in microseconds
    pub fn record(&mut self, delta_us: u32) {
        self.deltas_us.write(delta_us);
    }

    /// Average frames per second over the window, rounded down
    ///
    /// Zero until a non-zero delta has been recorded.
    pub fn fps(&self) -> u32 {
        let total: u64 = self.deltas_us.iter().map(|&d| u64::from(d)).sum();
        if total == 0 {
            return 0;
        }
        (1_000_000 * self.deltas_us.len() as u64 / total) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(FpsCounter::new().fps(), 0);
    }

    #[test]
    fn test_zero_deltas_is_zero() {
        let mut fps = FpsCounter::new();
        fps.record(0);
        fps.record(0);
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn test_steady_rate() {
        let mut fps = FpsCounter::new();
        for _ in 0..5 {
            fps.record(20_000);
        }
        assert_eq!(fps.fps(), 50);
    }

    #[test]
    fn test_window_forgets_old_frames() {
        let mut fps = FpsCounter::new();
        for _ in 0..FPS_WINDOW {
            fps.record(1_000_000);
        }
        assert_eq!(fps.fps(), 1);
        for _ in 0..FPS_WINDOW {
            fps.record(10_000);
        }
        assert_eq!(fps.fps(), 100);
    }

    #[test]
    fn test_mixed_deltas() {
        let mut fps = FpsCounter::new();
        fps.record(10_000);
        fps.record(30_000);
        // 2 frames in 40 ms
        assert_eq!(fps.fps(), 50);
    }
}
