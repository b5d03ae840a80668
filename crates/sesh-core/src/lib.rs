//! sesh-core - Client-side session state and its orchestration.
//!
//! The [`SessionController`] owns the current [`Token`] and the identity
//! attached to it, keeps that token in step with a durable [`TokenStore`],
//! and drives login, identity refresh and logout against an [`AuthService`].
//!
//! # Example
//!
//! ```no_run
//! use sesh_core::{Credentials, MemoryTokenStore, RouteTable, SessionController, VisitedViews};
//! # use sesh_core::AuthService;
//!
//! # async fn example(service: impl AuthService + 'static) -> sesh_core::Result<()> {
//! let controller = SessionController::new(
//!     service,
//!     MemoryTokenStore::default(),
//!     RouteTable::default(),
//!     VisitedViews::default(),
//! );
//!
//! controller.login(Credentials::new(" alice ", "secret")).await?;
//! let identity = controller.fetch_identity().await?;
//! println!("logged in as {}", identity.username);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod memory;
pub mod state;
pub mod tokens;
pub mod traits;
pub mod types;

pub use controller::{SessionConfig, SessionController};
pub use credentials::Credentials;
pub use error::Error;
pub use identity::{Identity, LoginResponse};
pub use memory::{MemoryTokenStore, Route, RouteTable, View, VisitedViews};
pub use state::{SessionPhase, SessionState};
pub use tokens::Token;
pub use traits::{AuthService, Router, TokenStore, ViewRegistry};
pub use types::ServiceUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
