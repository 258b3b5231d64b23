//! Robot harness for end-to-end sheet testing.
//!
//! Wires a [`SheetController`] to recording fakes so scenario tests read
//! like user interactions:
//!
//! ```
//! use snapsheet_core::SheetConfig;
//! use snapsheet_testing::SheetRobot;
//!
//! let robot = SheetRobot::new(SheetConfig::default()).unwrap();
//! robot.open();
//! robot.settle();
//! robot.press_at(500.0);
//! robot.drag_to(450.0);
//! robot.release();
//! robot.settle();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use snapsheet_core::{ConfigurationError, SheetConfig};
use snapsheet_foundation::{PointerEvent, PointerSurface};
use snapsheet_ui::{
    AnimationEnd, AnimationSpec, HeightAnimator, SheetController, SheetHost, SheetState,
    ViewportMetrics,
};

/// One `animate_to` call as seen by the host animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedTransition {
    pub start: f32,
    pub target: f32,
    pub spec: AnimationSpec,
}

struct PendingTransition {
    record: RecordedTransition,
    on_rest: AnimationEnd,
}

/// Fake host animator.
///
/// Transitions queue up until the test settles them, which mirrors how a
/// real animator completes asynchronously relative to the event stream.
/// Superseded transitions stay queued so their completion callbacks can be
/// fired late on purpose.
#[derive(Default)]
pub struct RecordingAnimator {
    height: Cell<f32>,
    immediate: RefCell<Vec<f32>>,
    pending: RefCell<VecDeque<PendingTransition>>,
    history: RefCell<Vec<RecordedTransition>>,
}

impl RecordingAnimator {
    /// Complete the oldest queued transition: apply its target height and
    /// fire its completion callback. Returns `false` when nothing was
    /// pending.
    pub fn settle_next(&self) -> bool {
        let Some(pending) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        self.height.set(pending.record.target);
        (pending.on_rest)();
        true
    }

    /// Complete every queued transition in order.
    pub fn settle_all(&self) {
        while self.settle_next() {}
    }

    /// Advance the oldest queued transition to `fraction` of its duration
    /// without completing it, applying the spec's easing curve.
    pub fn step_current(&self, fraction: f32) {
        let pending = self.pending.borrow();
        if let Some(front) = pending.front() {
            let eased = front.record.spec.easing.transform(fraction);
            let height = front.record.start + (front.record.target - front.record.start) * eased;
            self.height.set(height);
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Heights applied immediately (drag tracking), in order.
    pub fn immediate_heights(&self) -> Vec<f32> {
        self.immediate.borrow().clone()
    }

    /// Every transition ever requested, settled or not.
    pub fn transitions(&self) -> Vec<RecordedTransition> {
        self.history.borrow().clone()
    }

    pub fn last_transition(&self) -> Option<RecordedTransition> {
        self.history.borrow().last().copied()
    }
}

impl HeightAnimator for RecordingAnimator {
    fn set_height(&self, height: f32) {
        self.height.set(height);
        self.immediate.borrow_mut().push(height);
    }

    fn animate_to(&self, target: f32, spec: AnimationSpec, on_rest: AnimationEnd) {
        let record = RecordedTransition {
            start: self.height.get(),
            target,
            spec,
        };
        self.history.borrow_mut().push(record);
        self.pending
            .borrow_mut()
            .push_back(PendingTransition { record, on_rest });
    }

    fn height(&self) -> f32 {
        self.height.get()
    }
}

/// Fake viewport with a test-adjustable height.
pub struct AdjustableViewport {
    height: Cell<f32>,
}

impl AdjustableViewport {
    pub fn new(height: f32) -> Self {
        Self {
            height: Cell::new(height),
        }
    }

    pub fn set_height(&self, height: f32) {
        self.height.set(height);
    }
}

impl ViewportMetrics for AdjustableViewport {
    fn viewport_height(&self) -> f32 {
        self.height.get()
    }
}

/// Pointer surface that counts listener acquisition and release.
#[derive(Default)]
pub struct BalancedSurface {
    acquired: Cell<u32>,
    released: Cell<u32>,
}

impl BalancedSurface {
    pub fn acquired(&self) -> u32 {
        self.acquired.get()
    }

    pub fn released(&self) -> u32 {
        self.released.get()
    }

    pub fn is_balanced(&self) -> bool {
        self.acquired.get() == self.released.get()
    }
}

impl PointerSurface for BalancedSurface {
    fn acquire_global_listeners(&self) {
        self.acquired.set(self.acquired.get() + 1);
    }

    fn release_global_listeners(&self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Default viewport height used by [`SheetRobot::new`].
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

/// Drives a real controller through scripted user interactions.
pub struct SheetRobot {
    controller: SheetController,
    animator: Rc<RecordingAnimator>,
    viewport: Rc<AdjustableViewport>,
    surface: Rc<BalancedSurface>,
    close_count: Rc<Cell<usize>>,
}

impl SheetRobot {
    /// Build a robot around `config` with an 800px viewport.
    pub fn new(config: SheetConfig) -> Result<Self, ConfigurationError> {
        Self::with_viewport(config, DEFAULT_VIEWPORT_HEIGHT)
    }

    pub fn with_viewport(
        config: SheetConfig,
        viewport_height: f32,
    ) -> Result<Self, ConfigurationError> {
        let animator = Rc::new(RecordingAnimator::default());
        let viewport = Rc::new(AdjustableViewport::new(viewport_height));
        let surface = Rc::new(BalancedSurface::default());
        let close_count = Rc::new(Cell::new(0));
        let counter = close_count.clone();
        let controller = SheetController::new(
            config,
            SheetHost {
                animator: animator.clone(),
                viewport: viewport.clone(),
                surface: surface.clone(),
                on_close: Some(Rc::new(move || counter.set(counter.get() + 1))),
            },
        )?;
        Ok(Self {
            controller,
            animator,
            viewport,
            surface,
            close_count,
        })
    }

    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    pub fn animator(&self) -> &RecordingAnimator {
        &self.animator
    }

    pub fn surface(&self) -> &BalancedSurface {
        &self.surface
    }

    pub fn state(&self) -> SheetState {
        self.controller.state()
    }

    pub fn height(&self) -> f32 {
        self.controller.current_height()
    }

    pub fn close_count(&self) -> usize {
        self.close_count.get()
    }

    // ── Scripted interactions ───────────────────────────────────────────

    pub fn open(&self) {
        self.controller.open(None);
    }

    pub fn open_at(&self, index: usize) {
        self.controller.open(Some(index));
    }

    pub fn close(&self) {
        self.controller.close();
    }

    /// Complete all in-flight transitions, as if their durations elapsed.
    pub fn settle(&self) {
        self.animator.settle_all();
    }

    pub fn press_at(&self, client_y: f32) {
        self.controller.pointer_down(&PointerEvent::primary(client_y));
    }

    pub fn press(&self, event: &PointerEvent) {
        self.controller.pointer_down(event);
    }

    pub fn drag_to(&self, client_y: f32) {
        self.controller.pointer_move(client_y);
    }

    pub fn release(&self) {
        self.controller.pointer_up();
    }

    pub fn cancel_pointer(&self) {
        self.controller.pointer_cancel();
    }

    pub fn tap_backdrop(&self) {
        self.controller.backdrop_click();
    }

    pub fn press_escape(&self) {
        self.controller.escape_key();
    }

    /// Simulate a window resize.
    pub fn resize_viewport(&self, height: f32) {
        self.viewport.set_height(height);
    }
}
