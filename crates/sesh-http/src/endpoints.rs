//! Endpoint paths and request/response bodies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchanges credentials for a token.
pub const LOGIN: &str = "user/login";

/// Returns the identity attached to a token.
pub const USER_INFO: &str = "user/info";

/// Ends the session identified by the bearer token.
pub const LOGOUT: &str = "user/logout";

/// Request body for login.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Query string for the identity call.
#[derive(Serialize)]
pub struct UserInfoQuery<'a> {
    pub token: &'a str,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
