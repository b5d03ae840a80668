//! Remote authentication service trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::identity::{Identity, LoginResponse};
use crate::{Credentials, Result, Token};

/// The remote authentication service.
///
/// Implementations report failures through [`crate::Error`]; the controller
/// hands those errors back to its caller untouched.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token.
    ///
    /// The controller always passes normalized credentials.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Look up the identity attached to a token.
    ///
    /// An empty `username` in the returned identity is a valid answer.
    async fn fetch_identity(&self, token: &Token) -> Result<Identity>;

    /// End the session identified by a token.
    async fn logout(&self, token: &Token) -> Result<()>;
}

#[async_trait]
impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        (**self).login(credentials).await
    }

    async fn fetch_identity(&self, token: &Token) -> Result<Identity> {
        (**self).fetch_identity(token).await
    }

    async fn logout(&self, token: &Token) -> Result<()> {
        (**self).logout(token).await
    }
}
