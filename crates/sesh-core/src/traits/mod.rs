//! Collaborator contracts the session controller consumes.

mod auth_service;
mod hooks;
mod token_store;

pub use auth_service::AuthService;
pub use hooks::{Router, ViewRegistry};
pub use token_store::TokenStore;
