//! The sheet controller: composition root of the Snapsheet core.
//!
//! Owns [`SheetState`] and the single drag session, feeds pointer events
//! through the gesture machine, and drives every transition through the
//! host's [`HeightAnimator`]. All orchestration is single-threaded and
//! event-driven; animation completion arrives as a callback and is the only
//! thing that flips `is_animating` (and, for a close, `visible`) back.

use std::cell::RefCell;
use std::rc::Rc;

use snapsheet_core::{ConfigurationError, SheetConfig, SnapPointTable};
use snapsheet_foundation::{DragGesture, DragRelease, PointerEvent, PointerSurface};

use crate::animation::{AnimationSpec, HeightAnimator};
use crate::viewport::ViewportMetrics;

/// Snapshot of the sheet's externally visible state.
///
/// `visible` and `current_snap_index` persist across open/close cycles;
/// closing the sheet does not reset the index it reopens at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetState {
    pub visible: bool,
    pub current_snap_index: usize,
    pub is_animating: bool,
}

/// Host collaborators wired into a controller at construction.
pub struct SheetHost {
    pub animator: Rc<dyn HeightAnimator>,
    pub viewport: Rc<dyn ViewportMetrics>,
    pub surface: Rc<dyn PointerSurface>,
    /// Invoked when a close is resolved: swipe-close, backdrop, or escape.
    pub on_close: Option<Rc<dyn Fn()>>,
}

/// What the completion signal of a transition should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestAction {
    ClearAnimating,
    /// Collapse finished: clear `is_animating` and hide the sheet. Hiding is
    /// deferred to this signal so the host never removes the element while
    /// the collapse is still running.
    Hide,
}

struct Inner {
    config: SheetConfig,
    state: SheetState,
    drag: DragGesture,
    animator: Rc<dyn HeightAnimator>,
    viewport: Rc<dyn ViewportMetrics>,
    on_close: Option<Rc<dyn Fn()>>,
    /// Bumped on every new transition (and on a drag takeover). Completion
    /// signals carry the epoch they were started under; a stale signal is
    /// dropped instead of corrupting state.
    transition_epoch: u64,
}

/// Clonable handle to the sheet's state and operations.
#[derive(Clone)]
pub struct SheetController {
    inner: Rc<RefCell<Inner>>,
}

impl SheetController {
    /// Build a controller, validating the configuration eagerly.
    pub fn new(config: SheetConfig, host: SheetHost) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let inner = Inner {
            state: SheetState {
                visible: false,
                current_snap_index: config.initial_snap_point,
                is_animating: false,
            },
            drag: DragGesture::new(host.surface),
            animator: host.animator,
            viewport: host.viewport,
            on_close: host.on_close,
            config,
            transition_epoch: 0,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    pub fn state(&self) -> SheetState {
        self.inner.borrow().state
    }

    /// The height currently applied by the host animator.
    pub fn current_height(&self) -> f32 {
        self.inner.borrow().animator.height()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().drag.is_dragging()
    }

    /// Open the sheet, optionally at a specific snap index.
    ///
    /// The sheet is marked visible before the expand animation starts. An
    /// out-of-range index is ignored and the persisted index is used.
    pub fn open(&self, index: Option<usize>) {
        let (target, spec, epoch) = {
            let mut inner = self.inner.borrow_mut();
            let Some(table) = resolved_table(&inner) else {
                return;
            };
            if let Some(requested) = index {
                if requested < table.len() {
                    inner.state.current_snap_index = requested;
                } else {
                    log::debug!(
                        "open: snap index {requested} out of range, keeping {}",
                        inner.state.current_snap_index
                    );
                }
            }
            let Some(target) = table.height_at(inner.state.current_snap_index) else {
                return;
            };
            inner.state.visible = true;
            inner.state.is_animating = true;
            inner.transition_epoch += 1;
            (
                target,
                AnimationSpec::settle(inner.config.duration_millis),
                inner.transition_epoch,
            )
        };
        log::debug!("opening sheet, expanding to {target}");
        self.animate(target, spec, epoch, RestAction::ClearAnimating);
    }

    /// Collapse the sheet to height zero and hide it when the collapse
    /// completes. An in-progress drag is cancelled; close wins.
    pub fn close(&self) {
        let (spec, epoch) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.visible {
                return;
            }
            inner.drag.cancel();
            inner.state.is_animating = true;
            inner.transition_epoch += 1;
            (
                AnimationSpec::collapse(inner.config.duration_millis),
                inner.transition_epoch,
            )
        };
        log::debug!("closing sheet");
        self.animate(0.0, spec, epoch, RestAction::Hide);
    }

    /// Animate to the snap point at `index`.
    ///
    /// An out-of-range index is a no-op, not an error.
    pub fn snap_to_point(&self, index: usize) {
        let target = {
            let inner = self.inner.borrow();
            let Some(table) = resolved_table(&inner) else {
                return;
            };
            match table.height_at(index) {
                Some(target) => target,
                None => {
                    log::debug!(
                        "snap_to_point({index}) out of range for {} points, ignoring",
                        table.len()
                    );
                    return;
                }
            }
        };
        self.start_snap(index, target);
    }

    /// Pointer-down on the sheet. Starts a drag session when the event
    /// qualifies; a drag takes over from any running transition.
    pub fn pointer_down(&self, event: &PointerEvent) {
        let mut inner = self.inner.borrow_mut();
        if !inner.state.visible {
            return;
        }
        let start_height = {
            let rendered = inner.animator.height();
            if rendered.is_finite() && rendered > 0.0 {
                rendered
            } else {
                let Some(table) = resolved_table(&inner) else {
                    return;
                };
                table
                    .height_at(inner.state.current_snap_index)
                    .unwrap_or(table.min())
            }
        };
        let expand = inner.config.expand_on_content_drag;
        if inner.drag.begin(event, start_height, expand) {
            inner.transition_epoch += 1;
            inner.state.is_animating = false;
        }
    }

    /// Pointer movement during a drag. Applies the rubber-banded height to
    /// the host immediately, with no easing.
    pub fn pointer_move(&self, client_y: f32) {
        let live = {
            let mut inner = self.inner.borrow_mut();
            if !inner.drag.is_dragging() {
                return;
            }
            let Some(table) = resolved_table(&inner) else {
                return;
            };
            inner.drag.drag_to(client_y, table.min(), table.max())
        };
        if let Some(live) = live {
            let animator = self.inner.borrow().animator.clone();
            animator.set_height(live);
        }
    }

    /// Pointer-up: resolve the drag to a swipe-close or a settle.
    pub fn pointer_up(&self) {
        enum Outcome {
            Close,
            Settle { index: usize, target: f32 },
        }

        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if !inner.drag.is_dragging() {
                return;
            }
            let Some(table) = resolved_table(&inner) else {
                inner.drag.cancel();
                return;
            };
            let can_swipe_close = inner.config.can_swipe_close;
            match inner.drag.release(can_swipe_close, table.min()) {
                Some(DragRelease::SwipeClose) => Outcome::Close,
                Some(DragRelease::Settle { height }) => {
                    let index = table.closest_index(height);
                    match table.height_at(index) {
                        Some(target) => Outcome::Settle { index, target },
                        None => return,
                    }
                }
                None => return,
            }
        };

        match outcome {
            Outcome::Close => self.resolve_close(),
            Outcome::Settle { index, target } => self.start_snap(index, target),
        }
    }

    /// Defensive pointer-cancel handling: the session ends and the sheet
    /// settles to the nearest snap point. A cancel never closes the sheet.
    pub fn pointer_cancel(&self) {
        let settle = {
            let mut inner = self.inner.borrow_mut();
            let Some(table) = resolved_table(&inner) else {
                inner.drag.cancel();
                return;
            };
            inner.drag.cancel().map(|height| {
                let index = table.closest_index(height);
                (index, table.height_at(index))
            })
        };
        if let Some((index, Some(target))) = settle {
            self.start_snap(index, target);
        }
    }

    /// Backdrop click; honors `can_backdrop_close`.
    pub fn backdrop_click(&self) {
        let allowed = {
            let inner = self.inner.borrow();
            inner.state.visible && inner.config.can_backdrop_close
        };
        if allowed {
            self.resolve_close();
        }
    }

    /// Escape key. Closes regardless of `can_backdrop_close`, matching the
    /// original component's keyboard handling.
    pub fn escape_key(&self) {
        if self.inner.borrow().state.visible {
            self.resolve_close();
        }
    }

    /// Fire `on_close` once, then run the collapse. Any in-progress drag is
    /// cancelled by `close`.
    fn resolve_close(&self) {
        let on_close = self.inner.borrow().on_close.clone();
        if let Some(on_close) = on_close {
            on_close();
        }
        self.close();
    }

    fn start_snap(&self, index: usize, target: f32) {
        let (spec, epoch) = {
            let mut inner = self.inner.borrow_mut();
            inner.state.current_snap_index = index;
            inner.state.is_animating = true;
            inner.transition_epoch += 1;
            (
                AnimationSpec::settle(inner.config.duration_millis),
                inner.transition_epoch,
            )
        };
        log::debug!("settling to snap index {index} at height {target}");
        self.animate(target, spec, epoch, RestAction::ClearAnimating);
    }

    fn animate(&self, target: f32, spec: AnimationSpec, epoch: u64, action: RestAction) {
        let animator = self.inner.borrow().animator.clone();
        let weak = Rc::downgrade(&self.inner);
        animator.animate_to(
            target,
            spec,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let mut inner = inner.borrow_mut();
                if inner.transition_epoch != epoch {
                    // A newer transition superseded this one; its own
                    // completion signal wins.
                    return;
                }
                inner.state.is_animating = false;
                if action == RestAction::Hide {
                    inner.state.visible = false;
                }
            }),
        );
    }
}

/// Resolve the snap table against the live viewport height.
///
/// Configuration is validated at construction, so this can only fail on a
/// non-finite viewport; that is logged and treated as "geometry unavailable".
fn resolved_table(inner: &Inner) -> Option<SnapPointTable> {
    match SnapPointTable::resolve(&inner.config.snap_points, inner.viewport.viewport_height()) {
        Ok(table) => Some(table),
        Err(err) => {
            log::warn!("snap points failed to resolve: {err}");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
