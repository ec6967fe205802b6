//! Pure math/data for panel geometry in Floatpane
//!
//! This crate contains the geometry primitives and the corner-candidate
//! computation used by the gesture controllers. It has no dependencies and
//! no host coupling, so every function here is unit-testable with plain
//! numbers.

mod corner;
mod geometry;

pub use corner::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::corner::{AvoidZone, Corner, CornerCandidate, ViewportMetrics};
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
}
