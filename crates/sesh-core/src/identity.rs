//! Values returned by the authentication service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::tokens::Token;

/// Response from a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The newly issued bearer token.
    pub token: Token,
}

/// The identity attached to a token.
///
/// Every field defaults when the service leaves it out or sends `null`. An
/// empty `username` means the service does not consider the token logged in,
/// even though the call itself succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name.
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    /// Avatar URI.
    #[serde(default, deserialize_with = "nullable")]
    pub picture: String,
    /// Roles in the order the service listed them.
    #[serde(default, deserialize_with = "nullable")]
    pub roles: Vec<String>,
    /// Permissions in the order the service listed them.
    #[serde(default, deserialize_with = "nullable")]
    pub permissions: Vec<String>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Identity {
    /// Returns true if the service named a user.
    pub fn is_resolved(&self) -> bool {
        !self.username.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty() {
        let identity: Identity = serde_json::from_value(json!({ "roles": ["admin"] })).unwrap();
        assert_eq!(identity.username, "");
        assert_eq!(identity.picture, "");
        assert_eq!(identity.roles, vec!["admin"]);
        assert!(identity.permissions.is_empty());
        assert!(!identity.is_resolved());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let identity: Identity =
            serde_json::from_value(json!({ "username": null, "roles": null })).unwrap();
        assert_eq!(identity, Identity::default());
    }

    #[test]
    fn role_order_is_preserved() {
        let identity: Identity = serde_json::from_value(json!({
            "username": "bob",
            "roles": ["editor", "admin", "editor"],
        }))
        .unwrap();
        assert_eq!(identity.roles, vec!["editor", "admin", "editor"]);
    }
}
