//! Shared gesture constants for the sheet's drag handling.
//!
//! These values are in logical pixels and are intentionally kept in one
//! place so the gesture machine and its tests cannot drift apart.

/// Overshoot below the lowest snap point required before a release counts as
/// a swipe-close.
///
/// Releasing anywhere above `min - SWIPE_CLOSE_SLOP` settles back to the
/// nearest snap point instead of closing, so a slightly over-dragged sheet
/// does not dismiss by accident. The 40 px value comes from the original web
/// component and feels right on both mouse and touch input.
pub const SWIPE_CLOSE_SLOP: f32 = 40.0;
