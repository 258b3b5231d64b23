//! Testing utilities and harness for Snapsheet.
//!
//! Provides [`SheetRobot`], a robot-style API for driving a real
//! `SheetController` against fake collaborators: scripted gestures, manual
//! animation settling, and listener-balance assertions.

pub mod robot;

pub use robot::{
    AdjustableViewport, BalancedSurface, RecordedTransition, RecordingAnimator, SheetRobot,
};

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod tests;
