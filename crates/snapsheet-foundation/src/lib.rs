//! Input layer for Snapsheet: the pointer event model, interactivity
//! classification, and the drag/snap gesture state machine.

pub mod drag;
pub mod gesture_constants;
pub mod pointer;
pub mod surface;

pub use drag::{DragGesture, DragRelease};
pub use gesture_constants::SWIPE_CLOSE_SLOP;
pub use pointer::{PointerButton, PointerEvent, SheetRegion, TargetRole};
pub use surface::{NoopPointerSurface, PointerSurface};
