//! Press→drag gesture state machine.
//!
//! Owns one session at a time. A pointer-down on a valid initiator opens a
//! press; crossing the distance threshold promotes it to a drag, which is
//! when the pointer is captured and text selection is suppressed. Release
//! hands the accumulated translation and the tracked velocity back to the
//! caller, which owns the settle protocol.

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::handle_registry::DragScope;
use crate::pointer::{GestureSurface, PointerEvent, PointerId};
use crate::velocity_tracker::VelocityTracker;
use floatpane_geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Distance from the down-point at which a press becomes a drag.
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DRAG_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Press,
    Drag,
}

/// Result of a completed drag, handed to the settle protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    /// Translation accumulated after promotion, in px. Travel spent
    /// crossing the threshold belongs to the press and is not counted.
    pub translation: Point,
    /// Release velocity in px/sec.
    pub velocity: Point,
}

/// Observable outcome of feeding one pointer-move into the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTransition {
    /// Event did not belong to the active session, or there is none.
    Ignored,
    /// Still below the promotion threshold.
    Pressed,
    /// This move crossed the threshold; the drag just started.
    Started,
    /// An active drag moved; the new total translation is attached.
    Moved { translation: Point },
}

struct Session {
    pointer_id: PointerId,
    origin: Point,
    translation: Point,
    last_position: Point,
    tracker: VelocityTracker,
    dragging: bool,
}

/// Single-session drag recognizer.
pub struct DragController {
    config: DragConfig,
    session: Option<Session>,
    disabled: bool,
    suppress_next_click: bool,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
            disabled: false,
            suppress_next_click: false,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) if session.dragging => DragPhase::Drag,
            Some(_) => DragPhase::Press,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Drag
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Opens a press session if the event may initiate a drag.
    ///
    /// Rejected while disabled, while another session is active, or when the
    /// scope does not validate the event's hit chain. No side effects happen
    /// here; capture waits for drag promotion.
    pub fn pointer_down(&mut self, event: &PointerEvent, scope: &DragScope) -> bool {
        if self.disabled {
            return false;
        }
        if self.session.is_some() {
            log::debug!("drag rejected: session already active");
            return false;
        }
        if !scope.is_valid_initiator(&event.hit_chain) {
            return false;
        }

        let mut tracker = VelocityTracker::new();
        tracker.add_sample(event.time_ms, event.position);
        self.session = Some(Session {
            pointer_id: event.id,
            origin: event.position,
            translation: Point::ZERO,
            last_position: event.position,
            tracker,
            dragging: false,
        });
        true
    }

    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        surface: &dyn GestureSurface,
    ) -> DragTransition {
        let Some(session) = self.session.as_mut() else {
            return DragTransition::Ignored;
        };
        if event.id != session.pointer_id {
            return DragTransition::Ignored;
        }

        if !session.dragging {
            // Threshold is measured from the original down-point, never
            // re-based on intermediate positions.
            let distance = event.position.distance_to(session.origin);
            if distance < self.config.threshold {
                return DragTransition::Pressed;
            }
            // The promoting move's travel counts toward the threshold, not
            // the translation; deltas accumulate from here.
            session.dragging = true;
            session.last_position = event.position;
            session.tracker.add_sample(event.time_ms, event.position);
            surface.capture_pointer(session.pointer_id);
            surface.set_selection_enabled(false);
            return DragTransition::Started;
        }

        // Per-event deltas stay correct under pointer capture even if the
        // host re-bases coordinates mid-gesture.
        let delta = event.position - session.last_position;
        session.last_position = event.position;
        session.translation += delta;
        session.tracker.add_sample(event.time_ms, event.position);
        DragTransition::Moved {
            translation: session.translation,
        }
    }

    /// Closes the session. Returns the drag result if the session had been
    /// promoted; a press released below the threshold is a plain click and
    /// produces nothing.
    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        surface: &dyn GestureSurface,
    ) -> Option<DragEnd> {
        let session = self.session.as_ref()?;
        if event.id != session.pointer_id {
            return None;
        }
        let mut session = self.session.take()?;

        if !session.dragging {
            return None;
        }

        session.tracker.add_sample(event.time_ms, event.position);
        surface.release_pointer(session.pointer_id);
        surface.set_selection_enabled(true);
        self.suppress_next_click = true;

        Some(DragEnd {
            translation: session.translation,
            velocity: session.tracker.velocity(),
        })
    }

    /// Discards any session without emitting a result, releasing capture and
    /// re-enabling selection if the session had them.
    pub fn cancel(&mut self, surface: &dyn GestureSurface) {
        if let Some(session) = self.session.take() {
            if session.dragging {
                surface.release_pointer(session.pointer_id);
                surface.set_selection_enabled(true);
            }
        }
    }

    /// Flipping to disabled cancels any in-flight session immediately.
    pub fn set_disabled(&mut self, disabled: bool, surface: &dyn GestureSurface) {
        self.disabled = disabled;
        if disabled {
            self.cancel(surface);
        }
    }

    /// True exactly once after a completed drag, so the release is not also
    /// interpreted as a click on the element under the pointer.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_next_click)
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerEventKind;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct TestSurface {
        captured: RefCell<Vec<PointerId>>,
        released: RefCell<Vec<PointerId>>,
        selection_enabled: Cell<bool>,
    }

    impl TestSurface {
        fn new() -> Self {
            let surface = Self::default();
            surface.selection_enabled.set(true);
            surface
        }
    }

    impl GestureSurface for TestSurface {
        fn capture_pointer(&self, id: PointerId) {
            self.captured.borrow_mut().push(id);
        }

        fn release_pointer(&self, id: PointerId) {
            self.released.borrow_mut().push(id);
        }

        fn set_selection_enabled(&self, enabled: bool) {
            self.selection_enabled.set(enabled);
        }
    }

    fn down(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Down, Point::new(x, y), t).with_id(1)
    }

    fn mv(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, Point::new(x, y), t).with_id(1)
    }

    fn up(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Up, Point::new(x, y), t).with_id(1)
    }

    #[test]
    fn stays_in_press_below_threshold() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        assert!(controller.pointer_down(&down(100.0, 100.0, 0), &scope));
        assert_eq!(controller.phase(), DragPhase::Press);

        // Wander around the down-point without ever leaving the 5px radius.
        for (i, (x, y)) in [(102.0, 100.0), (100.0, 103.0), (97.0, 98.0)].iter().enumerate() {
            let transition =
                controller.pointer_move(&mv(*x, *y, (i as i64 + 1) * 20), &surface);
            assert_eq!(transition, DragTransition::Pressed);
        }
        assert_eq!(controller.phase(), DragPhase::Press);
        assert!(surface.captured.borrow().is_empty());
    }

    #[test]
    fn threshold_measured_from_original_down_point() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(100.0, 100.0, 0), &scope);
        // Two small steps whose cumulative distance from origin crosses 5px
        // even though each step alone is below it.
        assert_eq!(
            controller.pointer_move(&mv(103.0, 100.0, 20), &surface),
            DragTransition::Pressed
        );
        assert_eq!(
            controller.pointer_move(&mv(106.0, 100.0, 40), &surface),
            DragTransition::Started
        );
        assert_eq!(controller.phase(), DragPhase::Drag);
        assert_eq!(surface.captured.borrow().as_slice(), &[1]);
        assert!(!surface.selection_enabled.get());
    }

    #[test]
    fn drag_accumulates_per_event_deltas() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        // First move promotes; deltas accumulate from (10, 0) onwards.
        controller.pointer_move(&mv(10.0, 0.0, 20), &surface);
        controller.pointer_move(&mv(15.0, 5.0, 40), &surface);
        let transition = controller.pointer_move(&mv(12.0, 9.0, 60), &surface);

        assert_eq!(
            transition,
            DragTransition::Moved {
                translation: Point::new(2.0, 9.0)
            }
        );
    }

    #[test]
    fn promoting_move_contributes_no_translation() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        // 20px of travel crosses the threshold; all of it is press travel.
        assert_eq!(
            controller.pointer_move(&mv(20.0, 0.0, 20), &surface),
            DragTransition::Started
        );
        assert_eq!(
            controller.pointer_move(&mv(25.0, 0.0, 40), &surface),
            DragTransition::Moved {
                translation: Point::new(5.0, 0.0)
            }
        );
    }

    #[test]
    fn release_reports_translation_and_velocity() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        controller.pointer_move(&mv(10.0, 0.0, 20), &surface);
        controller.pointer_move(&mv(100.0, 0.0, 250), &surface);
        let end = controller.pointer_up(&up(100.0, 0.0, 500), &surface).unwrap();

        // 90px accumulated after the promotion at (10, 0).
        assert_eq!(end.translation, Point::new(90.0, 0.0));
        // 100px of total travel over 500ms -> 200 px/s.
        assert!((end.velocity.x - 200.0).abs() < 1e-3, "got {}", end.velocity.x);
        assert_eq!(end.velocity.y, 0.0);
        assert_eq!(surface.released.borrow().as_slice(), &[1]);
        assert!(surface.selection_enabled.get());
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn press_release_is_a_plain_click() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        assert!(controller.pointer_up(&up(1.0, 1.0, 100), &surface).is_none());
        assert!(!controller.take_click_suppression());
        assert!(surface.released.borrow().is_empty());
    }

    #[test]
    fn click_suppressed_exactly_once_after_drag() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        controller.pointer_move(&mv(50.0, 0.0, 20), &surface);
        controller.pointer_up(&up(50.0, 0.0, 40), &surface);

        assert!(controller.take_click_suppression());
        assert!(!controller.take_click_suppression());
    }

    #[test]
    fn second_pointer_down_rejected_while_active() {
        let mut controller = DragController::default();
        let scope = DragScope::new();

        assert!(controller.pointer_down(&down(0.0, 0.0, 0), &scope));
        let other = PointerEvent::new(PointerEventKind::Down, Point::new(5.0, 5.0), 10).with_id(2);
        assert!(!controller.pointer_down(&other, &scope));
    }

    #[test]
    fn foreign_pointer_moves_ignored() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        let foreign = PointerEvent::new(PointerEventKind::Move, Point::new(50.0, 0.0), 20).with_id(2);
        assert_eq!(controller.pointer_move(&foreign, &surface), DragTransition::Ignored);
        assert_eq!(controller.phase(), DragPhase::Press);
    }

    #[test]
    fn disable_cancels_and_releases() {
        let mut controller = DragController::default();
        let scope = DragScope::new();
        let surface = TestSurface::new();

        controller.pointer_down(&down(0.0, 0.0, 0), &scope);
        controller.pointer_move(&mv(50.0, 0.0, 20), &surface);
        controller.set_disabled(true, &surface);

        assert_eq!(controller.phase(), DragPhase::Idle);
        assert_eq!(surface.released.borrow().as_slice(), &[1]);
        assert!(surface.selection_enabled.get());

        // And no new session while disabled.
        assert!(!controller.pointer_down(&down(0.0, 0.0, 30), &scope));
    }

    #[test]
    fn scope_gates_initiation() {
        let mut controller = DragController::default();
        let mut scope = DragScope::new();
        scope.register(10);

        let miss = down(0.0, 0.0, 0).with_hit_chain([5]);
        assert!(!controller.pointer_down(&miss, &scope));

        let hit = down(0.0, 0.0, 0).with_hit_chain([99, 10]);
        assert!(controller.pointer_down(&hit, &scope));
    }
}
