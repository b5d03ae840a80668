//! sesh-http - HTTP-backed authentication service.

mod client;
mod endpoints;
mod service;

pub use service::HttpAuthService;
