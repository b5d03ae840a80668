//! Session-scoped collaborators reset on logout.

use std::sync::Arc;

/// Application navigation that depends on the logged-in user.
pub trait Router: Send + Sync {
    /// Restore navigation to its unauthenticated default configuration.
    fn reset(&self);
}

/// Registry of per-view state scoped to the current session.
pub trait ViewRegistry: Send + Sync {
    /// Discard every entry.
    fn clear_all(&self);
}

impl<T: Router + ?Sized> Router for Arc<T> {
    fn reset(&self) {
        (**self).reset()
    }
}

impl<T: ViewRegistry + ?Sized> ViewRegistry for Arc<T> {
    fn clear_all(&self) {
        (**self).clear_all()
    }
}
