//! Resolved snap-point table: pixel heights, bounds, closest-index lookup.
//!
//! The table is a derived view, recomputed from the configured snap points and
//! the current viewport height on demand. It is never mutated in place; a
//! viewport resize simply produces a fresh table.

use smallvec::SmallVec;

use crate::error::ConfigurationError;
use crate::units::SnapPoint;

/// Snap lists are nearly always a handful of entries.
type Heights = SmallVec<[f32; 4]>;

/// Snap points resolved to pixels against one viewport height.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPointTable {
    flattened: Heights,
    min: f32,
    max: f32,
}

impl SnapPointTable {
    /// Resolve `points` against `viewport_height`.
    ///
    /// Input order is preserved: the table's index space is the caller's
    /// snap-point order, not sorted order. Fails on an empty list or on a
    /// point that resolves to a non-finite height, so `min`/`max` can never
    /// come out of an empty reduction as infinities.
    pub fn resolve(
        points: &[SnapPoint],
        viewport_height: f32,
    ) -> Result<Self, ConfigurationError> {
        if points.is_empty() {
            return Err(ConfigurationError::EmptySnapPoints);
        }

        let mut flattened = Heights::with_capacity(points.len());
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for (index, point) in points.iter().enumerate() {
            let height = point.resolve(viewport_height);
            if !height.is_finite() {
                return Err(ConfigurationError::NonFiniteSnapPoint {
                    index,
                    value: height,
                });
            }
            min = min.min(height);
            max = max.max(height);
            flattened.push(height);
        }

        Ok(Self { flattened, min, max })
    }

    /// Flattened pixel heights, in the original snap-point order.
    pub fn heights(&self) -> &[f32] {
        &self.flattened
    }

    /// Height at `index`, or `None` when the index is out of range.
    pub fn height_at(&self, index: usize) -> Option<f32> {
        self.flattened.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.flattened.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flattened.is_empty()
    }

    /// Lowest resolved height.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Highest resolved height.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Index of the snap point closest to `probe_height`.
    ///
    /// Linear scan; only a strictly smaller distance replaces the current
    /// best, so an exact tie resolves to the earliest index.
    pub fn closest_index(&self, probe_height: f32) -> usize {
        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;
        for (index, height) in self.flattened.iter().enumerate() {
            let distance = (height - probe_height).abs();
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        best_index
    }
}

#[cfg(test)]
#[path = "tests/snap_points_tests.rs"]
mod tests;
