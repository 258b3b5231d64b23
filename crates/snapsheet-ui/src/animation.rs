//! Transition specification and the host animator seam.
//!
//! The core never animates anything itself; it hands the host a target
//! height, a spec, and a completion callback. Which animation library runs
//! underneath (spring, tween, CSS transition) is the host's business.

/// Easing curves for sheet transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease; used for the collapse on close.
    EaseInOut,
    /// Material-style settle curve; the default for snap transitions.
    FastOutSlowIn,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` through the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluate a CSS-style cubic bezier at the given x fraction.
///
/// Bisects on the x polynomial; sixteen iterations put the error well below
/// anything visible at screen resolution.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        // Cubic bezier with fixed endpoints 0 and 1.
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = fraction;
    for _ in 0..16 {
        let x = sample(x1, x2, t);
        if (x - fraction).abs() < 1e-5 {
            break;
        }
        if x < fraction {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    sample(y1, y2, t)
}

/// Duration and easing handed through to the host animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Spec for snapping to a point after a drag or an open.
    pub fn settle(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::FastOutSlowIn)
    }

    /// Spec for the collapse that runs on close.
    pub fn collapse(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::EaseInOut)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::settle(250)
    }
}

/// Completion signal delivered when a transition settles.
pub type AnimationEnd = Box<dyn FnOnce()>;

/// Host collaborator that applies heights to the rendered sheet.
pub trait HeightAnimator {
    /// Apply a height immediately, with no easing. Used for 1:1 finger
    /// tracking during a drag; any running transition must be cancelled.
    fn set_height(&self, height: f32);

    /// Animate the height to `target`, invoking `on_rest` exactly once when
    /// the transition settles. Starting a new transition supersedes a
    /// running one; the superseded `on_rest` may or may not fire (the
    /// controller guards against stale signals either way).
    fn animate_to(&self, target: f32, spec: AnimationSpec, on_rest: AnimationEnd);

    /// The height currently applied by the host, mid-transition included.
    fn height(&self) -> f32;
}
