//! Drag/snap gesture state machine.
//!
//! Consumes pointer down/move/up events and produces live rubber-banded
//! heights while dragging. On release the session resolves to either a
//! swipe-close or a settle target; the controller in `snapsheet-ui` turns
//! that into an animation.
//!
//! State flow: `Idle → Dragging → (Closing | Settling) → Idle`. Exactly one
//! session is active at a time; a second pointer-down while dragging is
//! ignored and the live session continues.

use std::rc::Rc;

use snapsheet_core::{rubberband_if_out_of_bounds, DEFAULT_RUBBERBAND_CONSTANT};

use crate::gesture_constants::SWIPE_CLOSE_SLOP;
use crate::pointer::{PointerButton, PointerEvent, SheetRegion};
use crate::surface::PointerSurface;

/// How a drag session ended on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRelease {
    /// Released below `min - SWIPE_CLOSE_SLOP` with swipe-close enabled.
    /// No snap animation runs; the sheet closes.
    SwipeClose,
    /// Settle to the snap point nearest to this final rubber-banded height.
    Settle { height: f32 },
}

/// A live drag, created on pointer-down and destroyed on pointer-up/cancel.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    /// Pointer Y captured at session start.
    start_y: f32,
    /// Sheet height captured at session start.
    start_height: f32,
    /// Current rubber-banded candidate height.
    live_height: f32,
}

/// The drag gesture machine.
///
/// Owns the single [`DragSession`] and the scoped acquisition of the host's
/// global listeners through [`PointerSurface`].
pub struct DragGesture {
    surface: Rc<dyn PointerSurface>,
    session: Option<DragSession>,
}

impl DragGesture {
    pub fn new(surface: Rc<dyn PointerSurface>) -> Self {
        Self {
            surface,
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The current rubber-banded height, while a session is live.
    pub fn live_height(&self) -> Option<f32> {
        self.session.map(|session| session.live_height)
    }

    /// Try to start a session from a pointer-down.
    ///
    /// Refused (returning `false`, with no listener acquisition) when:
    /// - a session is already active,
    /// - the button is not primary,
    /// - the pointer went down on an interactive child,
    /// - the pointer went down on content while `expand_on_content_drag`
    ///   is disabled.
    ///
    /// `start_height` is the currently rendered sheet height.
    pub fn begin(
        &mut self,
        event: &PointerEvent,
        start_height: f32,
        expand_on_content_drag: bool,
    ) -> bool {
        if self.session.is_some() {
            log::trace!("pointer-down ignored: drag session already active");
            return false;
        }
        if event.button != PointerButton::Primary {
            return false;
        }
        if event.target.is_interactive() {
            log::trace!("pointer-down on interactive child, not starting drag");
            return false;
        }
        if event.region == SheetRegion::Content && !expand_on_content_drag {
            return false;
        }

        self.surface.acquire_global_listeners();
        self.session = Some(DragSession {
            start_y: event.client_y,
            start_height,
            live_height: start_height,
        });
        log::trace!(
            "drag session started at y={} height={}",
            event.client_y,
            start_height
        );
        true
    }

    /// Feed a pointer move, returning the new live height.
    ///
    /// Dragging the pointer up increases the height. The raw height is
    /// rubber-banded against `[min, max]` and must be applied by the host
    /// immediately, without easing, for 1:1 finger tracking.
    pub fn drag_to(&mut self, client_y: f32, min: f32, max: f32) -> Option<f32> {
        let session = self.session.as_mut()?;
        let delta = session.start_y - client_y;
        let raw_height = session.start_height + delta;
        let live =
            rubberband_if_out_of_bounds(raw_height, min, max, DEFAULT_RUBBERBAND_CONSTANT);
        session.live_height = live;
        Some(live)
    }

    /// End the session on pointer-up and resolve the outcome.
    ///
    /// Listeners are released on this path regardless of which branch is
    /// taken.
    pub fn release(&mut self, can_swipe_close: bool, min: f32) -> Option<DragRelease> {
        let session = self.session.take()?;
        self.surface.release_global_listeners();

        if can_swipe_close && session.live_height < min - SWIPE_CLOSE_SLOP {
            log::trace!("drag released at {} below close threshold", session.live_height);
            return Some(DragRelease::SwipeClose);
        }
        log::trace!("drag released, settling from {}", session.live_height);
        Some(DragRelease::Settle {
            height: session.live_height,
        })
    }

    /// Defensive teardown for pointer-cancel or lost capture.
    ///
    /// Ends the session, releases the listeners, and returns the height to
    /// settle from. The swipe-close branch is never taken here; only a real
    /// pointer-up may close the sheet.
    pub fn cancel(&mut self) -> Option<f32> {
        let session = self.session.take()?;
        self.surface.release_global_listeners();
        log::trace!("drag session cancelled at {}", session.live_height);
        Some(session.live_height)
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
