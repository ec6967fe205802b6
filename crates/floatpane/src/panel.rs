//! Panel orchestration: wires the gesture controllers to host capabilities.

use floatpane_animation::{
    ExponentialDecay, SettleAnimator, DEFAULT_DECELERATION_RATE, DEFAULT_SETTLE_DURATION_MS,
};
use floatpane_foundation::{
    resize_handle_rect, DragConfig, DragController, DragEnd, DragScope, DragTransition,
    GestureSurface, PointerEvent, ResizeConfig, ResizeController, ResizeDirection,
};
use floatpane_geometry::{
    corner_candidates, nearest_corner, AvoidZone, Corner, EdgeInsets, Point, Rect, Size,
    ViewportMetrics,
};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Supplies the panel's rendered geometry.
///
/// The engine never touches a UI tree itself; the hosting surface measures.
/// `panel_rect` may legitimately return `None` mid-gesture when the target
/// has been unmounted, in which case the current callback short-circuits.
pub trait Measurement {
    fn panel_rect(&self) -> Option<Rect>;
    fn viewport(&self) -> Size;

    fn scrollbar_width(&self) -> f32 {
        0.0
    }

    fn border_widths(&self) -> EdgeInsets {
        EdgeInsets::default()
    }
}

/// Fire-and-forget persistence of committed position and size.
///
/// Called at most once per completed gesture, never per intermediate frame.
/// Debouncing and network sync are the implementor's concern.
pub trait PanelStore {
    fn commit_position(&self, key: &str, corner: Corner);
    fn commit_size(&self, key: &str, size: Size);
}

/// Optionally supplies the avoid zone, queried once per geometry
/// computation.
pub trait AvoidZoneSource {
    fn avoid_zone(&self) -> Option<AvoidZone>;
}

/// Gesture lifecycle callbacks. Each fires at most once per gesture, in the
/// order start → end → animation-end; animation-end is skipped when the
/// translation was exactly zero.
#[derive(Default)]
pub struct PanelHooks {
    pub on_drag_start: Option<Box<dyn Fn()>>,
    pub on_drag_end: Option<Box<dyn Fn(Point, Point)>>,
    pub on_animation_end: Option<Box<dyn Fn(Corner)>>,
}

pub struct PanelConfig {
    /// Key under which position and size are persisted.
    pub storage_key: String,
    pub initial_corner: Corner,
    pub drag: DragConfig,
    pub resize: ResizeConfig,
    /// Gap kept between the panel and the viewport's right/bottom edges.
    pub corner_padding: f32,
    pub deceleration_rate: f32,
    pub settle_duration_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            storage_key: "floatpane".to_string(),
            initial_corner: Corner::BottomRight,
            drag: DragConfig::default(),
            resize: ResizeConfig::default(),
            corner_padding: 16.0,
            deceleration_rate: DEFAULT_DECELERATION_RATE,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
        }
    }
}

struct PanelState {
    /// The committed resting corner. Changes only inside a completed settle.
    corner: Corner,
    /// Transient visual translation while dragging or settling.
    offset: Point,
    settling: bool,
    /// Bumped by disable/dispose so a late settle completion no-ops.
    settle_generation: u64,
    disabled: bool,
    /// Set once by `dispose`; `set_disabled(false)` cannot clear it.
    disposed: bool,
}

/// One floating panel's interaction controller.
///
/// Owns the drag and resize state machines and enforces their mutual
/// exclusion: a resize cannot begin while a drag or settle is in flight and
/// a drag cannot begin while a resize session owns the pointer.
pub struct PanelController {
    config: PanelConfig,
    decay: ExponentialDecay,
    drag: DragController,
    resize: ResizeController,
    scope: DragScope,
    measurement: Rc<dyn Measurement>,
    store: Rc<dyn PanelStore>,
    avoid_zone: Option<Rc<dyn AvoidZoneSource>>,
    animator: Rc<dyn SettleAnimator>,
    surface: Rc<dyn GestureSurface>,
    hooks: Rc<PanelHooks>,
    state: Rc<RefCell<PanelState>>,
    cached_borders: Cell<Option<EdgeInsets>>,
}

impl PanelController {
    pub fn new(
        config: PanelConfig,
        measurement: Rc<dyn Measurement>,
        store: Rc<dyn PanelStore>,
        animator: Rc<dyn SettleAnimator>,
        surface: Rc<dyn GestureSurface>,
    ) -> Self {
        let state = PanelState {
            corner: config.initial_corner,
            offset: Point::ZERO,
            settling: false,
            settle_generation: 0,
            disabled: false,
            disposed: false,
        };
        Self {
            decay: ExponentialDecay::new(config.deceleration_rate),
            drag: DragController::new(config.drag),
            resize: ResizeController::new(config.resize),
            scope: DragScope::new(),
            config,
            measurement,
            store,
            avoid_zone: None,
            animator,
            surface,
            hooks: Rc::new(PanelHooks::default()),
            state: Rc::new(RefCell::new(state)),
            cached_borders: Cell::new(None),
        }
    }

    pub fn with_avoid_zone_source(mut self, source: Rc<dyn AvoidZoneSource>) -> Self {
        self.avoid_zone = Some(source);
        self
    }

    pub fn with_hooks(mut self, hooks: PanelHooks) -> Self {
        self.hooks = Rc::new(hooks);
        self
    }

    pub fn corner(&self) -> Corner {
        self.state.borrow().corner
    }

    /// The transient visual translation the host should render, relative to
    /// the committed corner position.
    pub fn offset(&self) -> Point {
        self.state.borrow().offset
    }

    pub fn is_settling(&self) -> bool {
        self.state.borrow().settling
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    pub fn drag_scope(&self) -> &DragScope {
        &self.scope
    }

    pub fn drag_scope_mut(&mut self) -> &mut DragScope {
        &mut self.scope
    }

    /// True exactly once after a completed drag; the host checks this before
    /// dispatching the click that follows the release.
    pub fn take_click_suppression(&mut self) -> bool {
        self.drag.take_click_suppression()
    }

    /// Forgets cached border measurements. The host calls this on viewport
    /// resize so handle rects are recomputed against the fresh box.
    pub fn invalidate_measurements(&self) {
        self.cached_borders.set(None);
    }

    fn borders(&self) -> EdgeInsets {
        match self.cached_borders.get() {
            Some(borders) => borders,
            None => {
                let borders = self.measurement.border_widths();
                self.cached_borders.set(Some(borders));
                borders
            }
        }
    }

    pub fn visible_resize_handles(&self) -> [ResizeDirection; 3] {
        ResizeDirection::visible_at(self.corner())
    }

    /// Hit rects for the visible resize handles, flush with the rendered
    /// border. Empty when the panel cannot be measured.
    pub fn resize_handle_rects(
        &self,
        thickness: f32,
    ) -> SmallVec<[(ResizeDirection, Rect); 3]> {
        let Some(rect) = self.measurement.panel_rect() else {
            return SmallVec::new();
        };
        let borders = self.borders();
        self.visible_resize_handles()
            .into_iter()
            .map(|direction| (direction, resize_handle_rect(direction, rect, borders, thickness)))
            .collect()
    }

    /// Feeds a pointer-down on the panel surface. Returns whether a press
    /// session opened.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        if self.resize.is_active() {
            log::debug!("drag rejected: resize session active");
            return false;
        }
        if self.state.borrow().settling {
            log::debug!("drag rejected: settle in flight");
            return false;
        }
        self.drag.pointer_down(event, &self.scope)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        match self.drag.pointer_move(event, &*self.surface) {
            DragTransition::Started => {
                if let Some(on_drag_start) = &self.hooks.on_drag_start {
                    on_drag_start();
                }
            }
            DragTransition::Moved { translation } => {
                self.state.borrow_mut().offset = translation;
            }
            DragTransition::Pressed | DragTransition::Ignored => {}
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        if let Some(end) = self.drag.pointer_up(event, &*self.surface) {
            if let Some(on_drag_end) = &self.hooks.on_drag_end {
                on_drag_end(end.translation, end.velocity);
            }
            self.settle(end);
        }
    }

    /// Host-side pointer cancellation (e.g. the window lost the pointer).
    pub fn pointer_cancel(&mut self) {
        self.drag.cancel(&*self.surface);
        self.resize.cancel(&*self.surface);
        self.state.borrow_mut().offset = Point::ZERO;
    }

    /// Opens a resize session from a pointer-down on `direction`'s handle.
    pub fn begin_resize(&mut self, direction: ResizeDirection, event: &PointerEvent) -> bool {
        {
            let state = self.state.borrow();
            if state.disabled {
                return false;
            }
            if state.settling {
                log::debug!("resize rejected: settle in flight");
                return false;
            }
        }
        if self.drag.is_active() {
            log::debug!("resize rejected: drag session active");
            return false;
        }
        let Some(rect) = self.measurement.panel_rect() else {
            return false;
        };
        self.resize.begin(
            direction,
            event,
            rect.size(),
            self.measurement.viewport(),
            &*self.surface,
        )
    }

    /// The clamped size for the current resize pointer position; the host
    /// applies it visually. Nothing is persisted here.
    pub fn resize_move(&self, event: &PointerEvent) -> Option<Size> {
        self.resize.update(event)
    }

    /// Ends the resize session and persists the final size once.
    pub fn resize_up(&mut self, event: &PointerEvent) {
        if let Some(size) = self.resize.finish(event, &*self.surface) {
            self.store.commit_size(&self.config.storage_key, size);
        }
    }

    /// Flipping to disabled cancels any in-flight session synchronously and
    /// invalidates a pending settle commit; an already-running settle
    /// animation plays out visually but commits nothing. Re-enabling a
    /// disposed controller is a no-op.
    pub fn set_disabled(&mut self, disabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed && !disabled {
                return;
            }
            state.disabled = disabled;
            if disabled {
                state.settle_generation += 1;
                state.settling = false;
                state.offset = Point::ZERO;
            }
        }
        self.drag.set_disabled(disabled, &*self.surface);
        if disabled {
            self.resize.cancel(&*self.surface);
        }
    }

    /// Hard teardown: releases capture, clears sessions, and cancels any
    /// pending settle commit. The controller accepts no gestures afterwards.
    pub fn dispose(&mut self) {
        self.state.borrow_mut().disposed = true;
        self.set_disabled(true);
    }

    fn settle(&mut self, end: DragEnd) {
        // A drag that ended exactly where it started needs no animation;
        // just drop the transient offset.
        if end.translation == Point::ZERO {
            self.state.borrow_mut().offset = Point::ZERO;
            return;
        }

        let Some(rect) = self.measurement.panel_rect() else {
            log::warn!("panel unmeasurable at release; skipping settle");
            self.state.borrow_mut().offset = Point::ZERO;
            return;
        };
        let metrics = ViewportMetrics::new(
            self.measurement.viewport(),
            self.measurement.scrollbar_width(),
            self.config.corner_padding,
        );
        if rect.size().is_empty() || metrics.viewport.is_empty() {
            log::warn!("degenerate measurement at release; skipping settle");
            self.state.borrow_mut().offset = Point::ZERO;
            return;
        }

        let current = self.state.borrow().corner;
        let avoid = self
            .avoid_zone
            .as_ref()
            .and_then(|source| source.avoid_zone());
        let candidates = corner_candidates(current, rect.size(), &metrics, avoid);
        let projected = end.translation + self.decay.project(end.velocity);

        let target = match nearest_corner(projected, &candidates) {
            Some(corner) => corner,
            None => {
                log::warn!("corner resolution failed; keeping {current:?}");
                current
            }
        };
        let target_offset = candidates
            .iter()
            .find(|candidate| candidate.corner == target)
            .map(|candidate| candidate.offset)
            .unwrap_or(Point::ZERO);

        let generation = {
            let mut state = self.state.borrow_mut();
            state.settling = true;
            state.settle_generation
        };

        let state = Rc::clone(&self.state);
        let store = Rc::clone(&self.store);
        let hooks = Rc::clone(&self.hooks);
        let key = self.config.storage_key.clone();
        self.animator.animate_to(
            end.translation,
            target_offset,
            self.config.settle_duration_ms,
            Box::new(move || {
                {
                    let mut state = state.borrow_mut();
                    // A disable or dispose raced the animation: the visual
                    // transition already played, but nothing commits.
                    if state.settle_generation != generation || state.disabled {
                        return;
                    }
                    state.settling = false;
                    state.offset = Point::ZERO;
                    state.corner = target;
                }
                store.commit_position(&key, target);
                if let Some(on_animation_end) = &hooks.on_animation_end {
                    on_animation_end(target);
                }
            }),
        );
    }
}
