//! The in-memory record of the current session.

use crate::Token;

/// Where a session stands with respect to its token and identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No token is held.
    Unauthenticated,
    /// A token is held but no identity has been resolved for it yet.
    AuthenticatedUnresolved,
    /// A token is held and its identity has been resolved.
    Authenticated,
}

/// The current session: token plus the identity attached to it.
///
/// Only [`crate::SessionController`] can change a `SessionState`; everyone
/// else reads owned copies handed out by [`crate::SessionController::state`].
/// Each setter replaces exactly one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Token,
    name: String,
    avatar: String,
    introduction: String,
    roles: Vec<String>,
    permissions: Vec<String>,
    // Set by the controller when a fetch resolved a username; cleared on
    // login and on every reset so a stale identity never reads as resolved.
    resolved: bool,
}

impl SessionState {
    /// State at process start: the stored token and nothing else.
    pub(crate) fn with_token(token: Token) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub(crate) fn set_token(&mut self, token: Token) {
        self.token = token;
    }

    pub(crate) fn set_roles(&mut self, roles: Vec<String>) {
        self.roles = roles;
    }

    pub(crate) fn set_permissions(&mut self, permissions: Vec<String>) {
        self.permissions = permissions;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_avatar(&mut self, avatar: String) {
        self.avatar = avatar;
    }

    pub(crate) fn set_resolved(&mut self, resolved: bool) {
        self.resolved = resolved;
    }

    /// Current bearer credential; empty when unauthenticated.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Display name of the current user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Avatar URI of the current user.
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Free-text profile descriptor.
    pub fn introduction(&self) -> &str {
        &self.introduction
    }

    /// Roles granted to the current user.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Fine-grained permissions granted to the current user.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_authenticated(), self.resolved) {
            (false, _) => SessionPhase::Unauthenticated,
            (true, false) => SessionPhase::AuthenticatedUnresolved,
            (true, true) => SessionPhase::Authenticated,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
