//! Session controller: the single writer of [`SessionState`].

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::AuthError;
use crate::identity::Identity;
use crate::state::SessionState;
use crate::traits::{AuthService, Router, TokenStore, ViewRegistry};
use crate::{Credentials, Result, Token};

/// Behavior switches for [`SessionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Apply the identity fields from a fetch whose response named no user,
    /// even though that fetch is reported as [`AuthError::Unauthenticated`].
    ///
    /// Defaults to `true`.
    pub apply_unresolved_identity: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            apply_unresolved_identity: true,
        }
    }
}

/// Owns the session state and runs the flows that change it.
///
/// Controllers are cheap to clone (they use internal `Arc`) and every clone
/// drives the same session. Each flow applies its state changes, and the
/// matching token store write, under one write lock, so readers never see
/// half of a flow's updates. The lock is never held while a service call is
/// in flight.
///
/// ```text
/// Unauthenticated --login--> AuthenticatedUnresolved --fetch_identity--> Authenticated
///        ^                                                                   |
///        +----------------------- logout / reset_token ---------------------+
/// ```
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    service: Box<dyn AuthService>,
    store: Box<dyn TokenStore>,
    router: Box<dyn Router>,
    views: Box<dyn ViewRegistry>,
    config: SessionConfig,
    state: RwLock<SessionState>,
}

impl Clone for SessionController {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl SessionController {
    /// Create a controller with the default [`SessionConfig`].
    ///
    /// The session starts with whatever token the store holds; identity
    /// fields start empty until [`Self::fetch_identity`] succeeds.
    pub fn new(
        service: impl AuthService + 'static,
        store: impl TokenStore + 'static,
        router: impl Router + 'static,
        views: impl ViewRegistry + 'static,
    ) -> Self {
        Self::with_config(service, store, router, views, SessionConfig::default())
    }

    /// Create a controller with an explicit configuration.
    pub fn with_config(
        service: impl AuthService + 'static,
        store: impl TokenStore + 'static,
        router: impl Router + 'static,
        views: impl ViewRegistry + 'static,
        config: SessionConfig,
    ) -> Self {
        let state = SessionState::with_token(store.get());

        Self {
            inner: Arc::new(ControllerInner {
                service: Box::new(service),
                store: Box::new(store),
                router: Box::new(router),
                views: Box::new(views),
                config,
                state: RwLock::new(state),
            }),
        }
    }

    /// Returns a copy of the current session state.
    pub async fn state(&self) -> SessionState {
        self.inner.state.read().await.clone()
    }

    /// Returns the current token.
    pub async fn token(&self) -> Token {
        self.inner.state.read().await.token().clone()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> SessionConfig {
        self.inner.config
    }

    /// Log in and adopt the returned token.
    ///
    /// The username is trimmed before it is sent; the password is sent as
    /// given. Identity fields from an earlier session are left alone and
    /// must be refreshed with [`Self::fetch_identity`].
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; nothing is modified on failure.
    #[instrument(skip(self, credentials), fields(username = %credentials.username().trim()))]
    pub async fn login(&self, credentials: Credentials) -> Result<()> {
        info!("Logging in");

        let credentials = credentials.normalized();
        let response = self.inner.service.login(&credentials).await?;

        {
            let mut state = self.inner.state.write().await;
            state.set_token(response.token.clone());
            state.set_resolved(false);
            self.inner.store.set(&response.token);
        }

        debug!("Login succeeded");
        Ok(())
    }

    /// Resolve the identity attached to the current token.
    ///
    /// On success roles, name, avatar and permissions are replaced with the
    /// response values and the full response is returned.
    ///
    /// # Errors
    ///
    /// Service errors are returned unchanged and leave the state alone. A
    /// response without a username yields [`AuthError::Unauthenticated`];
    /// see [`SessionConfig::apply_unresolved_identity`] for what happens to
    /// the state in that case.
    #[instrument(skip(self))]
    pub async fn fetch_identity(&self) -> Result<Identity> {
        info!("Fetching identity");

        let token = self.token().await;
        let identity = self.inner.service.fetch_identity(&token).await?;

        if !identity.is_resolved() {
            return Err(self.reject_unresolved_identity(&identity).await);
        }

        self.apply_identity(&identity, true).await;

        debug!(username = %identity.username, roles = identity.roles.len(), "Identity resolved");
        Ok(identity)
    }

    /// The service answered without naming a user. The call fails either
    /// way; with `apply_unresolved_identity` set, the (mostly empty) fields
    /// are still written first.
    async fn reject_unresolved_identity(&self, identity: &Identity) -> crate::Error {
        warn!("Identity response did not name a user");

        if self.inner.config.apply_unresolved_identity {
            self.apply_identity(identity, false).await;
        }

        AuthError::Unauthenticated.into()
    }

    async fn apply_identity(&self, identity: &Identity, resolved: bool) {
        let mut state = self.inner.state.write().await;
        state.set_roles(identity.roles.clone());
        state.set_name(identity.username.clone());
        state.set_avatar(identity.picture.clone());
        state.set_permissions(identity.permissions.clone());
        state.set_resolved(resolved);
    }

    /// Log out on the server, then clear the local session.
    ///
    /// After the server acknowledges, token, roles and permissions are
    /// cleared, the stored token is removed, the router is reset and every
    /// session-scoped view is discarded.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged. The local session, the router
    /// and the view registry are left untouched when the server did not
    /// acknowledge the logout.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");

        let token = self.token().await;
        self.inner.service.logout(&token).await?;

        self.clear_session().await;
        self.inner.router.reset();
        self.inner.views.clear_all();

        debug!("Logout succeeded");
        Ok(())
    }

    /// Clear the local session without contacting the server.
    ///
    /// Token, roles and permissions are cleared and the stored token is
    /// removed. The router and view registry are not touched.
    #[instrument(skip(self))]
    pub async fn reset_token(&self) {
        info!("Resetting token");
        self.clear_session().await;
    }

    async fn clear_session(&self) {
        let mut state = self.inner.state.write().await;
        state.set_token(Token::empty());
        state.set_roles(Vec::new());
        state.set_permissions(Vec::new());
        state.set_resolved(false);
        self.inner.store.remove();
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.inner.config)
            .field("state", &"[LOCKED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryTokenStore, RouteTable, VisitedViews};
    use crate::{Identity, LoginResponse};
    use async_trait::async_trait;

    struct FixedService {
        identity: Identity,
    }

    #[async_trait]
    impl AuthService for FixedService {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse> {
            Ok(LoginResponse {
                token: Token::new("fixed-token"),
            })
        }

        async fn fetch_identity(&self, _token: &Token) -> Result<Identity> {
            Ok(self.identity.clone())
        }

        async fn logout(&self, _token: &Token) -> Result<()> {
            Ok(())
        }
    }

    fn controller(identity: Identity, config: SessionConfig) -> SessionController {
        SessionController::with_config(
            FixedService { identity },
            MemoryTokenStore::default(),
            RouteTable::default(),
            VisitedViews::default(),
            config,
        )
    }

    #[test]
    fn default_config_applies_unresolved_identity() {
        assert!(SessionConfig::default().apply_unresolved_identity);
    }

    #[tokio::test]
    async fn disabled_toggle_leaves_state_alone_on_unresolved_identity() {
        let identity = Identity {
            username: String::new(),
            roles: vec!["admin".into()],
            ..Identity::default()
        };
        let controller = controller(
            identity,
            SessionConfig {
                apply_unresolved_identity: false,
            },
        );

        let err = controller.fetch_identity().await.unwrap_err();
        assert!(err.is_unauthenticated());
        assert!(controller.state().await.roles().is_empty());
    }

    #[tokio::test]
    async fn login_marks_identity_unresolved_again() {
        let identity = Identity {
            username: "alice".into(),
            ..Identity::default()
        };
        let controller = controller(identity, SessionConfig::default());

        controller.login(Credentials::new("alice", "pw")).await.unwrap();
        controller.fetch_identity().await.unwrap();
        assert_eq!(
            controller.state().await.phase(),
            crate::SessionPhase::Authenticated
        );

        controller.login(Credentials::new("alice", "pw")).await.unwrap();
        let state = controller.state().await;
        assert_eq!(state.phase(), crate::SessionPhase::AuthenticatedUnresolved);
        assert_eq!(state.name(), "alice");
    }

    #[test]
    fn debug_does_not_expose_state() {
        let controller = controller(Identity::default(), SessionConfig::default());
        let debug = format!("{:?}", controller);
        assert!(debug.contains("[LOCKED]"));
    }
}
