//! Error types for sesh.
//!
//! One error type covers every way a session operation can fail. Errors
//! raised by collaborators travel through the controller unchanged, so the
//! variant a caller sees is the variant the service or store produced.

use std::fmt;
use thiserror::Error;

/// The unified error type for sesh operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote call did not complete (connection, timeout, IO).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication failures, including a successful identity call that
    /// names no user.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The service answered with a non-success status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Malformed input such as a service URL.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error means the session is not (or no longer)
    /// authenticated.
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(err) => err.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (body decoding, redirect loops, ...).
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local IO failure while talking to a collaborator.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The identity call succeeded but named no user.
    #[error("user is not logged in, please log in")]
    Unauthenticated,

    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is no longer accepted.
    #[error("session expired")]
    SessionExpired,
}

/// Protocol-level errors from service responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.error.as_deref() == Some("AuthenticationRequired")
            || self.error.as_deref() == Some("ExpiredToken")
            || self.error.as_deref() == Some("InvalidToken")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
