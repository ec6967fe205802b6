//! Eight-direction panel resize controller.
//!
//! A resize session runs from pointer-down on a handle to pointer-up. The
//! dimensions are recomputed from the rect captured at session start plus
//! the total pointer delta, then clamped, so intermediate clamping never
//! accumulates rounding.

use crate::gesture_constants::MAX_SIZE_VIEWPORT_FRACTION;
use crate::pointer::{GestureSurface, PointerEvent, PointerId};
use floatpane_geometry::{Corner, EdgeInsets, Point, Rect, Size};

/// The eight resize handles: four edges and four diagonals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::Top,
        ResizeDirection::Right,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
    ];

    /// Per-axis growth signs: how a positive pointer delta changes
    /// (width, height) when dragging this handle.
    fn delta_signs(self) -> (f32, f32) {
        match self {
            ResizeDirection::Top => (0.0, -1.0),
            ResizeDirection::Right => (1.0, 0.0),
            ResizeDirection::Bottom => (0.0, 1.0),
            ResizeDirection::Left => (-1.0, 0.0),
            ResizeDirection::TopLeft => (-1.0, -1.0),
            ResizeDirection::TopRight => (1.0, -1.0),
            ResizeDirection::BottomLeft => (-1.0, 1.0),
            ResizeDirection::BottomRight => (1.0, 1.0),
        }
    }

    fn diagonal_of(corner: Corner) -> ResizeDirection {
        match corner {
            Corner::TopLeft => ResizeDirection::TopLeft,
            Corner::TopRight => ResizeDirection::TopRight,
            Corner::BottomLeft => ResizeDirection::BottomLeft,
            Corner::BottomRight => ResizeDirection::BottomRight,
        }
    }

    /// Whether this handle renders while the panel rests at `corner`.
    ///
    /// The two edges composing the docked corner are flush against the
    /// viewport and hidden. Of the diagonals only the one opposite the
    /// docked corner shows, since that is the only direction with room to
    /// grow on both axes.
    pub fn is_visible_at(self, corner: Corner) -> bool {
        match self {
            ResizeDirection::Top => !corner.is_top(),
            ResizeDirection::Bottom => !corner.is_bottom(),
            ResizeDirection::Left => !corner.is_left(),
            ResizeDirection::Right => !corner.is_right(),
            diagonal => diagonal == Self::diagonal_of(corner.opposite()),
        }
    }

    /// The three handles visible at `corner`: the two free edges, then the
    /// opposite diagonal.
    pub fn visible_at(corner: Corner) -> [ResizeDirection; 3] {
        let vertical = if corner.is_top() {
            ResizeDirection::Bottom
        } else {
            ResizeDirection::Top
        };
        let horizontal = if corner.is_left() {
            ResizeDirection::Right
        } else {
            ResizeDirection::Left
        };
        [vertical, horizontal, Self::diagonal_of(corner.opposite())]
    }
}

/// Size constraints for a resizable panel.
///
/// A missing max defaults to [`MAX_SIZE_VIEWPORT_FRACTION`] of the viewport
/// dimension, resolved once at session start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeConfig {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}

struct ResizeSession {
    direction: ResizeDirection,
    pointer_id: PointerId,
    start: Point,
    initial: Size,
    max: Size,
}

/// Single-session resize state machine.
pub struct ResizeController {
    config: ResizeConfig,
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn direction(&self) -> Option<ResizeDirection> {
        self.session.as_ref().map(|session| session.direction)
    }

    /// Opens a resize session from a pointer-down on a handle.
    ///
    /// `initial` is the panel size at gesture start, `viewport` resolves the
    /// default max. Rejected while another session is active.
    pub fn begin(
        &mut self,
        direction: ResizeDirection,
        event: &PointerEvent,
        initial: Size,
        viewport: Size,
        surface: &dyn GestureSurface,
    ) -> bool {
        if self.session.is_some() {
            log::debug!("resize rejected: session already active");
            return false;
        }

        let max = Size::new(
            self.config
                .max_width
                .unwrap_or(viewport.width * MAX_SIZE_VIEWPORT_FRACTION),
            self.config
                .max_height
                .unwrap_or(viewport.height * MAX_SIZE_VIEWPORT_FRACTION),
        );

        surface.capture_pointer(event.id);
        surface.set_selection_enabled(false);
        self.session = Some(ResizeSession {
            direction,
            pointer_id: event.id,
            start: event.position,
            initial,
            max,
        });
        true
    }

    /// The clamped size for the current pointer position, or `None` when the
    /// event does not belong to an active session.
    pub fn update(&self, event: &PointerEvent) -> Option<Size> {
        let session = self.session.as_ref()?;
        if event.id != session.pointer_id {
            return None;
        }
        Some(self.resolve(session, event.position))
    }

    /// Closes the session and returns the final clamped size.
    pub fn finish(&mut self, event: &PointerEvent, surface: &dyn GestureSurface) -> Option<Size> {
        let session = self.session.as_ref()?;
        if event.id != session.pointer_id {
            return None;
        }
        let session = self.session.take()?;
        let size = self.resolve(&session, event.position);
        surface.release_pointer(session.pointer_id);
        surface.set_selection_enabled(true);
        Some(size)
    }

    /// Discards the session without reporting a size.
    pub fn cancel(&mut self, surface: &dyn GestureSurface) {
        if let Some(session) = self.session.take() {
            surface.release_pointer(session.pointer_id);
            surface.set_selection_enabled(true);
        }
    }

    fn resolve(&self, session: &ResizeSession, position: Point) -> Size {
        let delta = position - session.start;
        let (sign_x, sign_y) = session.direction.delta_signs();
        Size::new(
            (session.initial.width + sign_x * delta.x)
                .clamp(self.config.min_width, session.max.width),
            (session.initial.height + sign_y * delta.y)
                .clamp(self.config.min_height, session.max.height),
        )
    }
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(ResizeConfig::default())
    }
}

/// Hit rect for a resize handle, flush with the rendered box.
///
/// The visible edge of a bordered element sits inside its layout rect, so
/// each strip is centered on the middle of the measured border rather than
/// the layout edge. Corner handles are `thickness` squares at the strip
/// intersections; edge strips span between them.
pub fn resize_handle_rect(
    direction: ResizeDirection,
    panel: Rect,
    borders: EdgeInsets,
    thickness: f32,
) -> Rect {
    let left = panel.x + borders.left * 0.5 - thickness * 0.5;
    let right = panel.x + panel.width - borders.right * 0.5 - thickness * 0.5;
    let top = panel.y + borders.top * 0.5 - thickness * 0.5;
    let bottom = panel.y + panel.height - borders.bottom * 0.5 - thickness * 0.5;
    let span_x = (right - left - thickness).max(0.0);
    let span_y = (bottom - top - thickness).max(0.0);

    match direction {
        ResizeDirection::Top => Rect::new(left + thickness, top, span_x, thickness),
        ResizeDirection::Bottom => Rect::new(left + thickness, bottom, span_x, thickness),
        ResizeDirection::Left => Rect::new(left, top + thickness, thickness, span_y),
        ResizeDirection::Right => Rect::new(right, top + thickness, thickness, span_y),
        ResizeDirection::TopLeft => Rect::new(left, top, thickness, thickness),
        ResizeDirection::TopRight => Rect::new(right, top, thickness, thickness),
        ResizeDirection::BottomLeft => Rect::new(left, bottom, thickness, thickness),
        ResizeDirection::BottomRight => Rect::new(right, bottom, thickness, thickness),
    }
}
