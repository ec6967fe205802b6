//! Exponential decay projection for release velocity.
//!
//! Models a fling that loses a fixed fraction of its velocity every
//! millisecond. Summing that geometric series gives the total remaining
//! travel in closed form, so the controller can predict the throw endpoint
//! without stepping an animation.

use floatpane_geometry::Point;

/// Default per-millisecond velocity retention rate.
///
/// At 0.999 a fling retains 99.9% of its velocity each millisecond, which
/// yields a projected travel of `v_ms * 999` for an initial velocity of
/// `v_ms` px/ms. Matches the feel of platform momentum scrolling.
pub const DEFAULT_DECELERATION_RATE: f32 = 0.999;

/// Closed-form exponential decay projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    rate: f32,
}

impl ExponentialDecay {
    /// Creates a projection with the given per-millisecond retention rate.
    ///
    /// Rates outside the open interval (0, 1) have no physical meaning and
    /// fall back to [`DEFAULT_DECELERATION_RATE`].
    pub fn new(rate: f32) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 && rate < 1.0 {
            rate
        } else {
            DEFAULT_DECELERATION_RATE
        };
        Self { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Total remaining travel for a velocity in px/sec along one axis.
    pub fn project_axis(&self, velocity: f32) -> f32 {
        (velocity / 1000.0 * self.rate) / (1.0 - self.rate)
    }

    /// Componentwise projection of a velocity vector in px/sec.
    pub fn project(&self, velocity: Point) -> Point {
        Point::new(self.project_axis(velocity.x), self.project_axis(velocity.y))
    }
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self::new(DEFAULT_DECELERATION_RATE)
    }
}
