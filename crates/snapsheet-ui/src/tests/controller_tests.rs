use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use snapsheet_core::{SheetConfig, SnapPoint};
use snapsheet_foundation::{PointerEvent, PointerSurface};

use crate::animation::{AnimationEnd, AnimationSpec, HeightAnimator};
use crate::controller::{SheetController, SheetHost};
use crate::viewport::ViewportMetrics;

struct Pending {
    target: f32,
    #[allow(dead_code)]
    spec: AnimationSpec,
    on_rest: AnimationEnd,
}

/// Fake animator that queues transitions until the test settles them.
///
/// Superseded transitions stay in the queue on purpose, so tests can fire
/// their completion callbacks late and exercise the stale-signal guard.
#[derive(Default)]
struct TestAnimator {
    height: Cell<f32>,
    immediate: RefCell<Vec<f32>>,
    pending: RefCell<VecDeque<Pending>>,
}

impl TestAnimator {
    fn settle_next(&self) -> bool {
        let Some(pending) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        self.height.set(pending.target);
        (pending.on_rest)();
        true
    }

    fn settle_all(&self) {
        while self.settle_next() {}
    }

    fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl HeightAnimator for TestAnimator {
    fn set_height(&self, height: f32) {
        self.height.set(height);
        self.immediate.borrow_mut().push(height);
    }

    fn animate_to(&self, target: f32, spec: AnimationSpec, on_rest: AnimationEnd) {
        self.pending.borrow_mut().push_back(Pending {
            target,
            spec,
            on_rest,
        });
    }

    fn height(&self) -> f32 {
        self.height.get()
    }
}

struct TestViewport {
    height: Cell<f32>,
}

impl ViewportMetrics for TestViewport {
    fn viewport_height(&self) -> f32 {
        self.height.get()
    }
}

#[derive(Default)]
struct CountingSurface {
    acquired: Cell<u32>,
    released: Cell<u32>,
}

impl PointerSurface for CountingSurface {
    fn acquire_global_listeners(&self) {
        self.acquired.set(self.acquired.get() + 1);
    }

    fn release_global_listeners(&self) {
        self.released.set(self.released.get() + 1);
    }
}

struct Fixture {
    controller: SheetController,
    animator: Rc<TestAnimator>,
    viewport: Rc<TestViewport>,
    surface: Rc<CountingSurface>,
    closes: Rc<Cell<usize>>,
}

/// `[25%, 50%, 90%]` on an 800px viewport: heights 200 / 400 / 720.
fn three_point_config() -> SheetConfig {
    SheetConfig {
        snap_points: vec![
            SnapPoint::Percent(25.0),
            SnapPoint::Percent(50.0),
            SnapPoint::Percent(90.0),
        ],
        initial_snap_point: 1,
        ..SheetConfig::default()
    }
}

fn fixture(config: SheetConfig) -> Fixture {
    let animator = Rc::new(TestAnimator::default());
    let viewport = Rc::new(TestViewport {
        height: Cell::new(800.0),
    });
    let surface = Rc::new(CountingSurface::default());
    let closes = Rc::new(Cell::new(0));
    let closes_in_callback = closes.clone();
    let controller = SheetController::new(
        config,
        SheetHost {
            animator: animator.clone(),
            viewport: viewport.clone(),
            surface: surface.clone(),
            on_close: Some(Rc::new(move || {
                closes_in_callback.set(closes_in_callback.get() + 1);
            })),
        },
    )
    .unwrap();
    Fixture {
        controller,
        animator,
        viewport,
        surface,
        closes,
    }
}

fn open_and_settle(fx: &Fixture) {
    fx.controller.open(None);
    fx.animator.settle_all();
}

#[test]
fn construction_rejects_invalid_config() {
    let animator: Rc<TestAnimator> = Rc::new(TestAnimator::default());
    let result = SheetController::new(
        SheetConfig {
            snap_points: Vec::new(),
            ..SheetConfig::default()
        },
        SheetHost {
            animator,
            viewport: Rc::new(TestViewport {
                height: Cell::new(800.0),
            }),
            surface: Rc::new(CountingSurface::default()),
            on_close: None,
        },
    );
    assert!(result.is_err());
}

#[test]
fn open_settles_at_the_initial_snap_point() {
    let fx = fixture(three_point_config());
    fx.controller.open(None);

    let state = fx.controller.state();
    assert!(state.visible, "visible flips on before the expand finishes");
    assert!(state.is_animating);

    fx.animator.settle_all();
    let state = fx.controller.state();
    assert!(!state.is_animating);
    assert_eq!(state.current_snap_index, 1);
    assert_eq!(fx.controller.current_height(), 400.0);
}

#[test]
fn open_with_explicit_index_overrides_the_persisted_one() {
    let fx = fixture(three_point_config());
    fx.controller.open(Some(2));
    fx.animator.settle_all();
    assert_eq!(fx.controller.current_height(), 720.0);

    // Out-of-range index falls back to what is persisted.
    fx.controller.close();
    fx.animator.settle_all();
    fx.controller.open(Some(9));
    fx.animator.settle_all();
    assert_eq!(fx.controller.current_height(), 720.0);
    assert_eq!(fx.controller.state().current_snap_index, 2);
}

#[test]
fn close_defers_hiding_until_the_collapse_completes() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.close();
    let state = fx.controller.state();
    assert!(state.visible, "element must not disappear mid-collapse");
    assert!(state.is_animating);

    fx.animator.settle_all();
    let state = fx.controller.state();
    assert!(!state.visible);
    assert!(!state.is_animating);
    assert_eq!(fx.controller.current_height(), 0.0);
}

#[test]
fn snap_index_persists_across_open_close_cycles() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);
    fx.controller.snap_to_point(2);
    fx.animator.settle_all();

    fx.controller.close();
    fx.animator.settle_all();
    assert_eq!(fx.controller.state().current_snap_index, 2);

    fx.controller.open(None);
    fx.animator.settle_all();
    assert_eq!(fx.controller.current_height(), 720.0);
}

#[test]
fn snap_to_point_out_of_range_is_a_no_op() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    let before = fx.controller.state();
    fx.controller.snap_to_point(3);
    assert_eq!(fx.animator.pending_count(), 0);
    assert_eq!(fx.controller.state(), before);
}

#[test]
fn snap_to_point_is_idempotent() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.snap_to_point(1);
    fx.animator.settle_all();
    let first = fx.controller.current_height();

    fx.controller.snap_to_point(1);
    fx.animator.settle_all();
    assert_eq!(fx.controller.current_height(), first);
    assert_eq!(fx.closes.get(), 0, "snapping must never fire close");
}

#[test]
fn drag_tracks_the_pointer_and_settles_to_the_closest_point() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    assert!(fx.controller.is_dragging());

    // 50px downward: height 350, within bounds so applied 1:1.
    fx.controller.pointer_move(550.0);
    assert_eq!(fx.controller.current_height(), 350.0);
    assert_eq!(fx.animator.immediate.borrow().as_slice(), &[350.0]);

    // 350 is closest to 400 (index 1).
    fx.controller.pointer_up();
    assert!(!fx.controller.is_dragging());
    fx.animator.settle_all();
    assert_eq!(fx.controller.state().current_snap_index, 1);
    assert_eq!(fx.controller.current_height(), 400.0);
    assert_eq!(fx.closes.get(), 0);
}

#[test]
fn swipe_past_the_threshold_closes_without_snapping() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    // Raw height 400 - 550 = -150; rubber-banded to ~152, below min - 40.
    fx.controller.pointer_move(1050.0);
    assert!(fx.controller.current_height() < 200.0 - 40.0);

    fx.controller.pointer_up();
    assert_eq!(fx.closes.get(), 1);
    // Only the collapse runs, no snap transition.
    assert_eq!(fx.animator.pending_count(), 1);
    fx.animator.settle_all();
    assert!(!fx.controller.state().visible);
}

#[test]
fn release_inside_the_slop_settles_back_instead_of_closing() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    // Raw height 190: below min but inside the 40px slop.
    fx.controller.pointer_move(710.0);
    let live = fx.controller.current_height();
    assert!(live < 200.0 && live > 160.0);

    fx.controller.pointer_up();
    assert_eq!(fx.closes.get(), 0);
    fx.animator.settle_all();
    assert_eq!(fx.controller.state().current_snap_index, 0);
    assert_eq!(fx.controller.current_height(), 200.0);
}

#[test]
fn swipe_close_respects_the_config_flag() {
    let fx = fixture(SheetConfig {
        can_swipe_close: false,
        ..three_point_config()
    });
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    fx.controller.pointer_move(1050.0);
    fx.controller.pointer_up();

    assert_eq!(fx.closes.get(), 0);
    fx.animator.settle_all();
    assert!(fx.controller.state().visible);
    assert_eq!(fx.controller.current_height(), 200.0);
}

#[test]
fn second_pointer_down_is_ignored_while_dragging() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    fx.controller.pointer_down(&PointerEvent::primary(300.0));
    assert_eq!(fx.surface.acquired.get(), 1);

    // The original session's start position still governs the math.
    fx.controller.pointer_move(490.0);
    assert_eq!(fx.controller.current_height(), 410.0);
}

#[test]
fn pointer_down_while_hidden_does_nothing() {
    let fx = fixture(three_point_config());
    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    assert!(!fx.controller.is_dragging());
    assert_eq!(fx.surface.acquired.get(), 0);
}

#[test]
fn pointer_cancel_settles_and_never_closes() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    fx.controller.pointer_move(1050.0); // far past the close threshold
    fx.controller.pointer_cancel();

    assert_eq!(fx.closes.get(), 0);
    assert!(!fx.controller.is_dragging());
    assert_eq!(fx.surface.released.get(), 1);
    fx.animator.settle_all();
    assert!(fx.controller.state().visible);
    assert_eq!(fx.controller.current_height(), 200.0);
}

#[test]
fn escape_during_a_drag_cancels_the_session_and_closes() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    fx.controller.pointer_move(550.0);
    fx.controller.escape_key();

    assert_eq!(fx.closes.get(), 1);
    assert!(!fx.controller.is_dragging());
    assert_eq!(fx.surface.released.get(), 1, "drag listeners must be freed");
    fx.animator.settle_all();
    assert!(!fx.controller.state().visible);
}

#[test]
fn escape_closes_even_when_backdrop_close_is_disabled() {
    let fx = fixture(SheetConfig {
        can_backdrop_close: false,
        ..three_point_config()
    });
    open_and_settle(&fx);
    fx.controller.escape_key();
    assert_eq!(fx.closes.get(), 1);
}

#[test]
fn backdrop_click_honors_the_config_flag() {
    let fx = fixture(SheetConfig {
        can_backdrop_close: false,
        ..three_point_config()
    });
    open_and_settle(&fx);
    fx.controller.backdrop_click();
    assert_eq!(fx.closes.get(), 0);
    assert!(fx.controller.state().visible);

    let fx = fixture(three_point_config());
    open_and_settle(&fx);
    fx.controller.backdrop_click();
    assert_eq!(fx.closes.get(), 1);
}

#[test]
fn dismissal_while_hidden_is_a_no_op() {
    let fx = fixture(three_point_config());
    fx.controller.backdrop_click();
    fx.controller.escape_key();
    assert_eq!(fx.closes.get(), 0);
    assert_eq!(fx.animator.pending_count(), 0);
}

#[test]
fn stale_completion_signals_are_ignored() {
    let fx = fixture(three_point_config());
    fx.controller.open(None);
    fx.controller.close(); // supersedes the expand before it settles

    // The expand's completion arrives late; it must not clear is_animating
    // while the collapse is still running.
    assert!(fx.animator.settle_next());
    let state = fx.controller.state();
    assert!(state.is_animating);
    assert!(state.visible);

    assert!(fx.animator.settle_next());
    let state = fx.controller.state();
    assert!(!state.is_animating);
    assert!(!state.visible);
}

#[test]
fn grabbing_the_sheet_takes_over_a_running_transition() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);
    fx.controller.snap_to_point(2); // transition to 720 in flight

    fx.controller.pointer_down(&PointerEvent::primary(500.0));
    assert!(fx.controller.is_dragging());
    assert!(!fx.controller.state().is_animating);

    // The superseded transition's completion must not flip is_animating.
    assert!(fx.animator.settle_next());
    assert!(!fx.controller.state().is_animating);
    assert!(fx.controller.is_dragging());
}

#[test]
fn percent_points_track_viewport_resizes() {
    let fx = fixture(three_point_config());
    open_and_settle(&fx);
    assert_eq!(fx.controller.current_height(), 400.0);

    fx.viewport.height.set(600.0);
    fx.controller.snap_to_point(1);
    fx.animator.settle_all();
    assert_eq!(fx.controller.current_height(), 300.0);
}
