//! Testing utilities and doubles for Floatpane
//!
//! Hand-driven implementations of the host capability traits, so gesture
//! flows can be exercised without a UI tree: a settle animator whose
//! completion is triggered from the test, a measurement with fixed numbers,
//! and recording persistence/surface doubles.

use floatpane::{AvoidZoneSource, Measurement, PanelStore};
use floatpane_animation::SettleAnimator;
use floatpane_foundation::{ElementId, GestureSurface, PointerEvent, PointerEventKind, PointerId};
use floatpane_geometry::{AvoidZone, Corner, EdgeInsets, Point, Rect, Size};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// A settle animation captured by [`ManualAnimator`], finished on demand.
pub struct PendingSettle {
    pub from: Point,
    pub to: Point,
    pub duration_ms: u32,
    on_end: Box<dyn FnOnce()>,
}

/// Settle animator that parks animations until the test finishes them.
#[derive(Default)]
pub struct ManualAnimator {
    pending: RefCell<VecDeque<PendingSettle>>,
}

impl ManualAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Target of the most recently started animation.
    pub fn last_target(&self) -> Option<Point> {
        self.pending.borrow().back().map(|settle| settle.to)
    }

    /// Starting offset of the most recently started animation.
    pub fn last_from(&self) -> Option<Point> {
        self.pending.borrow().back().map(|settle| settle.from)
    }

    /// Completes the oldest pending animation, running its completion
    /// callback. Returns false when nothing was pending.
    pub fn finish_next(&self) -> bool {
        let settle = self.pending.borrow_mut().pop_front();
        match settle {
            Some(settle) => {
                (settle.on_end)();
                true
            }
            None => false,
        }
    }

    pub fn finish_all(&self) {
        while self.finish_next() {}
    }
}

impl SettleAnimator for ManualAnimator {
    fn animate_to(&self, from: Point, to: Point, duration_ms: u32, on_end: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push_back(PendingSettle {
            from,
            to,
            duration_ms,
            on_end,
        });
    }
}

/// Settle animator that completes synchronously, for flows where the
/// animation itself is not under test.
pub struct ImmediateAnimator;

impl SettleAnimator for ImmediateAnimator {
    fn animate_to(&self, _from: Point, _to: Point, _duration_ms: u32, on_end: Box<dyn FnOnce()>) {
        on_end();
    }
}

/// Measurement returning fixed, test-settable numbers.
pub struct FixedMeasurement {
    pub rect: Cell<Option<Rect>>,
    pub viewport_size: Cell<Size>,
    pub scrollbar: Cell<f32>,
    pub borders: Cell<EdgeInsets>,
}

impl FixedMeasurement {
    pub fn new(rect: Rect, viewport: Size) -> Self {
        Self {
            rect: Cell::new(Some(rect)),
            viewport_size: Cell::new(viewport),
            scrollbar: Cell::new(0.0),
            borders: Cell::new(EdgeInsets::default()),
        }
    }

    /// Simulates the panel being unmounted mid-gesture.
    pub fn unmount(&self) {
        self.rect.set(None);
    }
}

impl Measurement for FixedMeasurement {
    fn panel_rect(&self) -> Option<Rect> {
        self.rect.get()
    }

    fn viewport(&self) -> Size {
        self.viewport_size.get()
    }

    fn scrollbar_width(&self) -> f32 {
        self.scrollbar.get()
    }

    fn border_widths(&self) -> EdgeInsets {
        self.borders.get()
    }
}

/// Persistence double that records every commit.
#[derive(Default)]
pub struct RecordingStore {
    pub positions: RefCell<Vec<(String, Corner)>>,
    pub sizes: RefCell<Vec<(String, Size)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelStore for RecordingStore {
    fn commit_position(&self, key: &str, corner: Corner) {
        self.positions.borrow_mut().push((key.to_string(), corner));
    }

    fn commit_size(&self, key: &str, size: Size) {
        self.sizes.borrow_mut().push((key.to_string(), size));
    }
}

/// Gesture surface double recording capture and selection state.
pub struct RecordingSurface {
    pub captured: RefCell<Vec<PointerId>>,
    pub released: RefCell<Vec<PointerId>>,
    pub selection_enabled: Cell<bool>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            captured: RefCell::new(Vec::new()),
            released: RefCell::new(Vec::new()),
            selection_enabled: Cell::new(true),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every captured pointer has been released again.
    pub fn is_balanced(&self) -> bool {
        self.captured.borrow().len() == self.released.borrow().len()
    }
}

impl GestureSurface for RecordingSurface {
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

/// Avoid-zone source with a test-settable zone.
#[derive(Default)]
pub struct StaticAvoidZone {
    pub zone: Cell<Option<AvoidZone>>,
}

impl StaticAvoidZone {
    pub fn new(zone: AvoidZone) -> Self {
        Self {
            zone: Cell::new(Some(zone)),
        }
    }
}

impl AvoidZoneSource for StaticAvoidZone {
    fn avoid_zone(&self) -> Option<AvoidZone> {
        self.zone.get()
    }
}

/// Pointer-event builders, all on pointer id 1.
pub fn down_at(x: f32, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Down, Point::new(x, y), time_ms).with_id(1)
}

pub fn down_on(x: f32, y: f32, time_ms: i64, chain: &[ElementId]) -> PointerEvent {
    down_at(x, y, time_ms).with_hit_chain(chain.iter().copied())
}

pub fn move_to(x: f32, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Move, Point::new(x, y), time_ms).with_id(1)
}

pub fn up_at(x: f32, y: f32, time_ms: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Up, Point::new(x, y), time_ms).with_id(1)
}
