//! Sheet configuration options.

use crate::error::ConfigurationError;
use crate::units::SnapPoint;

/// Options recognized by the sheet controller.
///
/// Defaults mirror the original web component: a single 50% snap point,
/// 250 ms transitions, swipe and backdrop dismissal enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Transition duration in milliseconds, passed through to the host
    /// animator.
    pub duration_millis: u64,
    /// Ordered snap points. The order given here is the index space used by
    /// `snap_to_point`; it is never sorted.
    pub snap_points: Vec<SnapPoint>,
    /// Index into `snap_points` the sheet first opens at.
    pub initial_snap_point: usize,
    /// Whether a backdrop is rendered and intercepts input.
    pub blocking: bool,
    /// Enables the swipe-down-to-close gesture.
    pub can_swipe_close: bool,
    /// Enables backdrop-click dismissal.
    pub can_backdrop_close: bool,
    /// Allows drags to start from the content region, not just the header.
    pub expand_on_content_drag: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            duration_millis: 250,
            snap_points: vec![SnapPoint::Percent(50.0)],
            initial_snap_point: 0,
            blocking: true,
            can_swipe_close: true,
            can_backdrop_close: true,
            expand_on_content_drag: true,
        }
    }
}

impl SheetConfig {
    /// Validate the configuration without resolving against a viewport.
    ///
    /// Catches the failure modes that would otherwise surface later as NaN
    /// or infinite geometry: an empty snap list, non-finite point values,
    /// and an initial index that addresses nothing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.snap_points.is_empty() {
            return Err(ConfigurationError::EmptySnapPoints);
        }
        for (index, point) in self.snap_points.iter().enumerate() {
            let raw = point.raw_value();
            if !raw.is_finite() {
                return Err(ConfigurationError::NonFiniteSnapPoint { index, value: raw });
            }
        }
        if self.initial_snap_point >= self.snap_points.len() {
            return Err(ConfigurationError::InitialIndexOutOfRange {
                index: self.initial_snap_point,
                len: self.snap_points.len(),
            });
        }
        Ok(())
    }
}
