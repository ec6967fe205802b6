//! Corner-candidate computation for snap-to-corner panels.
//!
//! A panel always rests at one of the four viewport corners. While it is
//! being thrown, the controller needs the four candidate translation targets
//! expressed relative to the corner the panel currently rests at, so that a
//! release point can be matched against them with a plain distance search.

use crate::geometry::{Point, Size};

/// One of the four viewport corners a panel can dock to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Fixed enumeration order. Distance ties during the nearest-corner
    /// search resolve to whichever corner appears first here.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_bottom(self) -> bool {
        !self.is_top()
    }

    pub fn is_right(self) -> bool {
        !self.is_left()
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// A reserved square region near one corner that a panel must not settle on.
///
/// The corner matching `corner` is displaced vertically by
/// `square_size + padding`; the other three corners are unaffected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidZone {
    pub corner: Corner,
    pub square_size: f32,
    pub padding: f32,
}

impl AvoidZone {
    fn displacement(&self) -> f32 {
        self.square_size + self.padding
    }
}

/// Measurement inputs for corner geometry, supplied by the host surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub viewport: Size,
    pub scrollbar_width: f32,
    pub padding: f32,
}

impl ViewportMetrics {
    pub const fn new(viewport: Size, scrollbar_width: f32, padding: f32) -> Self {
        Self {
            viewport,
            scrollbar_width,
            padding,
        }
    }
}

/// A corner paired with its translation target relative to the current corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerCandidate {
    pub corner: Corner,
    pub offset: Point,
}

/// Absolute resting position of `corner` for a panel of the given size.
///
/// Left corners sit at x = 0; right corners account for the scrollbar and
/// padding. Degenerate measurement (empty panel or viewport) yields
/// `Point::ZERO` so callers degrade to "no displacement" instead of
/// producing garbage offsets.
pub fn corner_position(
    corner: Corner,
    panel: Size,
    metrics: &ViewportMetrics,
    avoid: Option<AvoidZone>,
) -> Point {
    if panel.is_empty() || metrics.viewport.is_empty() {
        return Point::ZERO;
    }

    let x = if corner.is_left() {
        0.0
    } else {
        metrics.viewport.width - metrics.scrollbar_width - metrics.padding - panel.width
    };

    let mut y = if corner.is_top() {
        0.0
    } else {
        metrics.viewport.height - metrics.padding - panel.height
    };

    if let Some(zone) = avoid {
        if zone.corner == corner {
            // Bottom corners move up and away from the zone, top corners down.
            if corner.is_bottom() {
                y -= zone.displacement();
            } else {
                y += zone.displacement();
            }
        }
    }

    Point::new(x, y)
}

/// All four corner targets expressed relative to the current corner's
/// absolute position, in fixed enumeration order.
pub fn corner_candidates(
    current: Corner,
    panel: Size,
    metrics: &ViewportMetrics,
    avoid: Option<AvoidZone>,
) -> [CornerCandidate; 4] {
    let anchor = corner_position(current, panel, metrics, avoid);
    Corner::ALL.map(|corner| CornerCandidate {
        corner,
        offset: corner_position(corner, panel, metrics, avoid) - anchor,
    })
}

/// The candidate closest to `point` by Euclidean distance.
///
/// Ties resolve to the first candidate in slice order. Returns `None` only
/// for an empty slice.
pub fn nearest_corner(point: Point, candidates: &[CornerCandidate]) -> Option<Corner> {
    let mut best: Option<(Corner, f32)> = None;
    for candidate in candidates {
        let distance = point.distance_to(candidate.offset);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate.corner, distance)),
        }
    }
    best.map(|(corner, _)| corner)
}
