//! Rolling frames-per-second average.

use std::collections::VecDeque;
use std::time::Duration;

/// Frames kept in the rolling window.
pub const FPS_WINDOW: usize = 10;

/// Shortest frame time accounted for, so instant frames can't divide by zero.
const MIN_FRAME_TIME: Duration = Duration::from_micros(1);

/// Mean FPS over the last few frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl FpsCounter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame that took `elapsed`.
    pub fn record(&mut self, elapsed: Duration) {
        let fps = 1.0 / elapsed.max(MIN_FRAME_TIME).as_secs_f64();
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    /// Arithmetic mean of the recorded samples, 0.0 before the first one.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Overlay text, e.g. `FPS: 30`.
    pub fn label(&self) -> String {
        format!("FPS: {:.0}", self.mean())
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mean_is_zero() {
        let fps = FpsCounter::default();
        assert_eq!(fps.mean(), 0.0);
        assert_eq!(fps.label(), "FPS: 0");
    }

    #[test]
    fn test_mean_of_recorded() {
        let mut fps = FpsCounter::default();
        fps.record(Duration::from_millis(100)); // 10
        fps.record(Duration::from_millis(50)); // 20
        assert!((fps.mean() - 15.0).abs() < 1e-9);
        assert_eq!(fps.label(), "FPS: 15");
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut fps = FpsCounter::new(2);
        fps.record(Duration::from_secs(1)); // 1
        fps.record(Duration::from_millis(500)); // 2
        fps.record(Duration::from_millis(250)); // 4
        assert_eq!(fps.len(), 2);
        assert!((fps.mean() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_finite() {
        let mut fps = FpsCounter::default();
        fps.record(Duration::ZERO);
        assert!(fps.mean().is_finite());
        assert!(fps.mean() > 999_999.0);
    }

    #[test]
    fn test_zero_capacity_bumped() {
        let mut fps = FpsCounter::new(0);
        fps.record(Duration::from_secs(1));
        assert_eq!(fps.len(), 1);
    }
}
