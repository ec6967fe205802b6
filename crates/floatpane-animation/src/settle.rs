//! Host capability for driving the settle animation.

use floatpane_geometry::Point;

/// Default duration of the snap-to-corner transition in milliseconds.
pub const DEFAULT_SETTLE_DURATION_MS: u32 = 250;

/// Drives the visual transition of a panel from its free-drag offset to a
/// corner target.
///
/// The engine only needs "start an animation, be told when it ends"; easing
/// and frame scheduling belong to the host. Implementations must invoke
/// `on_end` exactly once, after the final frame of the transition has been
/// presented, so that the commit never visually skips ahead of the panel.
pub trait SettleAnimator {
    fn animate_to(&self, from: Point, to: Point, duration_ms: u32, on_end: Box<dyn FnOnce()>);
}
