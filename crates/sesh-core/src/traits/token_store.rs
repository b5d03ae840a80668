//! Durable token storage trait.

use std::sync::Arc;

use crate::Token;

/// Durable storage for a single token under one fixed key.
///
/// Operations are synchronous and cannot fail from the caller's point of
/// view. Implementations backed by fallible media log the failure and carry
/// on; an unreadable store reads as the empty token.
///
/// A failed `set` or `remove` is therefore invisible to the controller: the
/// flow that called it still succeeds, and the in-memory token and the
/// stored token differ until the next successful write.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or the empty token if none is stored.
    fn get(&self) -> Token;

    /// Replace the stored token.
    fn set(&self, token: &Token);

    /// Forget the stored token.
    fn remove(&self);
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn get(&self) -> Token {
        (**self).get()
    }

    fn set(&self, token: &Token) {
        (**self).set(token)
    }

    fn remove(&self) {
        (**self).remove()
    }
}
