//! Floating-panel interaction engine.
//!
//! A panel rests at one of the four viewport corners. The engine recognizes
//! press→drag gestures scoped to registered drag handles, tracks release
//! velocity, projects the throw endpoint with an exponential-decay model,
//! snaps to the nearest corner (optionally displaced around an avoid zone),
//! and resizes from the three handles visible at the docked corner.
//!
//! The host supplies measurement, persistence, animation, and pointer side
//! effects through capability traits; everything in here is synchronous and
//! single-threaded.

mod panel;

pub use panel::*;

pub use floatpane_animation::{
    ExponentialDecay, SettleAnimator, DEFAULT_DECELERATION_RATE, DEFAULT_SETTLE_DURATION_MS,
};
pub use floatpane_foundation::{
    now_ms, DragConfig, DragEnd, DragPhase, DragScope, ElementId, GestureSurface, PointerEvent,
    PointerEventKind, PointerId, ResizeConfig, ResizeDirection, DRAG_THRESHOLD,
};
pub use floatpane_geometry::{
    AvoidZone, Corner, EdgeInsets, Point, Rect, Size, ViewportMetrics,
};
