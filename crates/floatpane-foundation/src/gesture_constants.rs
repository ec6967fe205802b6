//! Shared gesture constants for consistent pointer handling.
//!
//! These values are in logical pixels. They are defaults: every controller
//! accepts caller-supplied overrides through its config struct.

/// Drag promotion threshold in logical pixels.
///
/// A press becomes a drag once the pointer has moved this far from the
/// original down-point (Euclidean distance, measured from the down-point and
/// never re-based). Below it, the interaction stays a potential click.
///
/// 5.0 is small enough that an intentional drag feels immediate and large
/// enough that mouse jitter during a click does not start one.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Default maximum panel size as a fraction of the viewport dimension.
///
/// Applied per axis when the caller supplies no explicit max: a panel may
/// grow to 95% of the viewport width/height but never cover it entirely, so
/// the resize handles on the far side stay reachable.
pub const MAX_SIZE_VIEWPORT_FRACTION: f32 = 0.95;
