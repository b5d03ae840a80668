//! In-process collaborators.
//!
//! These cover applications that keep everything in memory, and they double
//! as test doubles for the controller.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::Token;
use crate::traits::{Router, TokenStore, ViewRegistry};

/// A [`TokenStore`] that lives as long as the process.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Token>>,
}

impl MemoryTokenStore {
    /// Create a store that already holds a token.
    pub fn with_token(token: Token) -> Self {
        Self {
            slot: Arc::new(RwLock::new(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Token {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &Token) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = token.clone();
    }

    fn remove(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Token::empty();
    }
}

/// A navigable route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// URL path, e.g. `/dashboard`.
    pub path: String,
    /// Route name.
    pub name: String,
    /// Roles allowed to see the route. Empty means everyone.
    pub roles: Vec<String>,
}

impl Route {
    /// A route open to everyone.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// Restrict the route to the given roles.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if a user holding `roles` may see this route.
    pub fn allows(&self, roles: &[String]) -> bool {
        self.roles.is_empty() || self.roles.iter().any(|r| roles.contains(r))
    }
}

/// A [`Router`] made of constant routes plus routes added after login.
///
/// Resetting drops every added route and keeps the constant ones.
#[derive(Debug, Clone)]
pub struct RouteTable {
    inner: Arc<RwLock<RouteTableInner>>,
}

#[derive(Debug)]
struct RouteTableInner {
    constant: Vec<Route>,
    added: Vec<Route>,
}

impl RouteTable {
    /// Create a table with the given constant routes.
    pub fn new(constant: Vec<Route>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RouteTableInner {
                constant,
                added: Vec::new(),
            })),
        }
    }

    /// Add the routes among `candidates` that `roles` may see.
    ///
    /// Returns how many routes were added.
    pub fn add_routes(&self, candidates: &[Route], roles: &[String]) -> usize {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = inner.added.len();
        inner.added.extend(
            candidates
                .iter()
                .filter(|route| route.allows(roles))
                .cloned(),
        );
        inner.added.len() - before
    }

    /// Returns the current routes, constant ones first.
    pub fn routes(&self) -> Vec<Route> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .constant
            .iter()
            .chain(inner.added.iter())
            .cloned()
            .collect()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            Route::new("/login", "Login"),
            Route::new("/404", "NotFound"),
            Route::new("/401", "Unauthorized"),
        ])
    }
}

impl Router for RouteTable {
    fn reset(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        debug!(dropped = inner.added.len(), "Resetting routes");
        inner.added.clear();
    }
}

/// A view the user has opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// URL path of the view.
    pub path: String,
    /// Component name, used as the cache key.
    pub name: String,
    /// Whether the view's state should be kept while the session lasts.
    pub cache: bool,
}

/// A [`ViewRegistry`] that tracks visited and cached views.
#[derive(Debug, Clone, Default)]
pub struct VisitedViews {
    inner: Arc<RwLock<VisitedViewsInner>>,
}

#[derive(Debug, Default)]
struct VisitedViewsInner {
    visited: Vec<View>,
    cached: Vec<String>,
}

impl VisitedViews {
    /// Record a visit. Repeat visits to the same path are ignored.
    pub fn add_view(&self, view: View) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if view.cache && !inner.cached.contains(&view.name) {
            inner.cached.push(view.name.clone());
        }
        if !inner.visited.iter().any(|v| v.path == view.path) {
            inner.visited.push(view);
        }
    }

    /// Returns the visited views in visiting order.
    pub fn visited(&self) -> Vec<View> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .visited
            .clone()
    }

    /// Returns the names of cached views.
    pub fn cached(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cached
            .clone()
    }
}

impl ViewRegistry for VisitedViews {
    fn clear_all(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.visited.clear();
        inner.cached.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_the_slot() {
        let store = MemoryTokenStore::default();
        let other = store.clone();
        store.set(&Token::new("abc"));
        assert_eq!(other.get().as_str(), "abc");
        other.remove();
        assert!(store.get().is_empty());
    }

    #[test]
    fn route_table_reset_keeps_constant_routes() {
        let table = RouteTable::default();
        let roles = vec!["editor".to_string()];
        let added = table.add_routes(
            &[
                Route::new("/dashboard", "Dashboard"),
                Route::new("/permission", "Permission").with_roles(["admin"]),
                Route::new("/article", "Article").with_roles(["admin", "editor"]),
            ],
            &roles,
        );
        assert_eq!(added, 2);
        assert_eq!(table.routes().len(), 5);

        table.reset();
        let paths: Vec<_> = table.routes().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/login", "/404", "/401"]);
    }

    #[test]
    fn visited_views_ignore_duplicates() {
        let views = VisitedViews::default();
        let view = View {
            path: "/dashboard".into(),
            name: "Dashboard".into(),
            cache: true,
        };
        views.add_view(view.clone());
        views.add_view(view);
        views.add_view(View {
            path: "/profile".into(),
            name: "Profile".into(),
            cache: false,
        });

        assert_eq!(views.visited().len(), 2);
        assert_eq!(views.cached(), ["Dashboard"]);

        views.clear_all();
        assert!(views.visited().is_empty());
        assert!(views.cached().is_empty());
    }
}
