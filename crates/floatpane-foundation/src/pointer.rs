//! Pointer event types and the host side-effect capability.

use floatpane_geometry::Point;
use smallvec::SmallVec;
use std::sync::LazyLock;
use web_time::Instant;

pub type PointerId = u64;

/// Opaque identity of a host element, used by the drag-handle registry.
pub type ElementId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer event in viewport coordinates with a millisecond timestamp.
///
/// `hit_chain` lists the element the pointer landed on first, followed by
/// its ancestors outward. The drag-handle registry matches against the whole
/// chain, so a pointer-down on a descendant of a registered handle counts.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub time_ms: i64,
    pub hit_chain: SmallVec<[ElementId; 8]>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            time_ms,
            hit_chain: SmallVec::new(),
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_hit_chain(mut self, chain: impl IntoIterator<Item = ElementId>) -> Self {
        self.hit_chain = chain.into_iter().collect();
        self
    }

    /// The innermost element hit by this event, if the host reported one.
    pub fn target(&self) -> Option<ElementId> {
        self.hit_chain.first().copied()
    }
}

static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Monotonic milliseconds since first use, for hosts whose pointer events
/// carry no timestamp of their own. WASM-safe via `web-time`.
pub fn now_ms() -> i64 {
    EPOCH.elapsed().as_millis() as i64
}

/// Host-owned side effects scoped to an active gesture.
///
/// Capture and selection suppression are resources: every exit path of a
/// session (pointer-up, cancel, disable, dispose) must release them, or the
/// page is left with a stuck pointer grab.
pub trait GestureSurface {
    fn capture_pointer(&self, id: PointerId);
    fn release_pointer(&self, id: PointerId);
    fn set_selection_enabled(&self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_first_chain_entry() {
        let event = PointerEvent::new(PointerEventKind::Down, Point::ZERO, 0)
            .with_hit_chain([7, 3, 1]);
        assert_eq!(event.target(), Some(7));

        let bare = PointerEvent::new(PointerEventKind::Down, Point::ZERO, 0);
        assert_eq!(bare.target(), None);
    }

    #[test]
    fn now_ms_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
