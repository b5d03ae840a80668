//! Bearer token type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer credential identifying the session to the service.
///
/// The empty token means "unauthenticated".
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Create a new token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The empty (unauthenticated) token.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns true if no credential is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing requests or persisting the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.debug_tuple("Token").field(&"").finish()
        } else {
            f.debug_tuple("Token").field(&"[REDACTED]").finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = Token::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_token_is_empty() {
        assert!(Token::default().is_empty());
        assert_eq!(Token::empty(), Token::new(""));
    }

    #[test]
    fn token_deserializes_from_plain_string() {
        let token: Token = serde_json::from_str("\"admin-token\"").unwrap();
        assert_eq!(token.as_str(), "admin-token");
    }
}
