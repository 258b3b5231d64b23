//! Sheet controller for Snapsheet.
//!
//! The controller is the composition root of the core: it owns the sheet's
//! visibility and snap index, feeds pointer events through the gesture
//! machine in `snapsheet-foundation`, and drives transitions through the
//! host-implemented collaborator traits defined here.

pub mod animation;
pub mod controller;
pub mod viewport;

pub use animation::{AnimationEnd, AnimationSpec, Easing, HeightAnimator};
pub use controller::{SheetController, SheetHost, SheetState};
pub use viewport::ViewportMetrics;
