//! Viewport seam.

/// Host collaborator reporting the current viewport height.
///
/// The controller queries this on every geometry read, so percent snap
/// points track window resizes without any cache invalidation protocol.
pub trait ViewportMetrics {
    fn viewport_height(&self) -> f32;
}
