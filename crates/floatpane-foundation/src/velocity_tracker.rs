//! Velocity tracking for throw gesture support.
//!
//! Keeps a short, time-gated window of pointer positions and estimates the
//! release velocity from the window endpoints. The estimate is deliberately
//! a window average rather than an instantaneous fit: the decay projection
//! downstream was tuned against it.

use floatpane_geometry::Point;
use smallvec::SmallVec;

/// Minimum spacing between retained samples in milliseconds.
pub const VELOCITY_SAMPLE_INTERVAL_MS: i64 = 10;

/// Number of samples retained; older samples are discarded.
pub const VELOCITY_HISTORY_SIZE: usize = 6;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: Point,
}

/// 2D velocity tracker over a bounded sample window.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; VELOCITY_HISTORY_SIZE]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position sample.
    ///
    /// Samples arriving within [`VELOCITY_SAMPLE_INTERVAL_MS`] of the
    /// previous retained sample are dropped, so a fast-firing host cannot
    /// collapse the window into a few microseconds of history.
    pub fn add_sample(&mut self, time_ms: i64, position: Point) {
        if let Some(last) = self.samples.last() {
            if time_ms - last.time_ms < VELOCITY_SAMPLE_INTERVAL_MS {
                return;
            }
        }
        if self.samples.len() == VELOCITY_HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(Sample { time_ms, position });
    }

    /// Velocity across the retained window in px/sec, componentwise.
    ///
    /// Returns `Point::ZERO` with fewer than two samples or zero elapsed
    /// time.
    pub fn velocity(&self) -> Point {
        let (Some(oldest), Some(newest)) = (self.samples.first(), self.samples.last()) else {
            return Point::ZERO;
        };
        let elapsed_ms = newest.time_ms - oldest.time_ms;
        if self.samples.len() < 2 || elapsed_ms <= 0 {
            return Point::ZERO;
        }
        let delta = newest.position - oldest.position;
        let scale = 1000.0 / elapsed_ms as f32;
        Point::new(delta.x * scale, delta.y * scale)
    }

    /// Clears all tracked data.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
