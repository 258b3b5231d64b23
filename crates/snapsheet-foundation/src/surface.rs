//! Scoped acquisition of the host's global pointer listeners.

/// Host collaborator that scopes the window-level move/up listeners to a
/// drag session.
///
/// The gesture machine calls `acquire_global_listeners` exactly once when a
/// session starts and `release_global_listeners` exactly once on every exit
/// path (settle, swipe-close, and cancel), so repeated open/drag cycles
/// cannot leak listeners. Implementations must tolerate being called from
/// inside their own event dispatch.
pub trait PointerSurface {
    /// Register move/up listeners on the whole input surface, not just the
    /// drag handle, so the drag continues when the pointer leaves the sheet.
    fn acquire_global_listeners(&self);

    /// Tear the session listeners back down.
    fn release_global_listeners(&self);
}

/// Surface for hosts whose event plumbing is always-on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPointerSurface;

impl PointerSurface for NoopPointerSurface {
    fn acquire_global_listeners(&self) {}

    fn release_global_listeners(&self) {}
}
