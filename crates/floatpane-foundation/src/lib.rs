//! Gesture recognition and resize machinery for Floatpane
//!
//! Everything in this crate is synchronous and host-agnostic: pointer events
//! come in with caller-supplied timestamps, state transitions happen inside
//! the call, and side effects (pointer capture, selection suppression) go
//! out through the [`GestureSurface`] capability.

mod drag;
mod gesture_constants;
mod handle_registry;
mod pointer;
mod resize;
mod velocity_tracker;

pub use drag::*;
pub use gesture_constants::*;
pub use handle_registry::*;
pub use pointer::*;
pub use resize::*;
pub use velocity_tracker::*;
