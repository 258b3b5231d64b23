//! Damped resistance for drags past the snap-point range.

/// Default damping constant, matching the feel of the original web ports.
pub const DEFAULT_RUBBERBAND_CONSTANT: f32 = 0.15;

/// Apply rubberband damping to `position` when it exits `[min, max]`.
///
/// Inside the range the value passes through untouched. A zero `constant`
/// degrades to a hard clamp. Out of range, the offset follows an asymptotic
/// curve: it grows monotonically with the overshoot but approaches a limit it
/// never reaches. This is the resistance felt when dragging past the topmost
/// or bottommost snap point.
pub fn rubberband_if_out_of_bounds(position: f32, min: f32, max: f32, constant: f32) -> f32 {
    if constant == 0.0 {
        return min_max(position, min, max);
    }
    if position < min {
        return min - rubberband(min - position, max - min, constant);
    }
    if position > max {
        return max + rubberband(position - max, max - min, constant);
    }
    position
}

fn rubberband(distance: f32, dimension: f32, constant: f32) -> f32 {
    if dimension == 0.0 || dimension.abs() == f32::INFINITY {
        return degenerate_rubberband(distance, constant);
    }
    (distance * dimension * constant) / (dimension + constant * distance)
}

/// Fallback curve for a zero or unbounded dimension.
fn degenerate_rubberband(distance: f32, constant: f32) -> f32 {
    distance.powf(constant * 5.0)
}

fn min_max(value: f32, min: f32, max: f32) -> f32 {
    min.max(value.min(max))
}
