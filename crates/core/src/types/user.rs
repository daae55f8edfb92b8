//! Shopper identity and auth token types.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The signed-in shopper.
///
/// The catalog's login endpoint only returns a token, so `id` and `email`
/// are filled in later (from the user directory) when available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Catalog user ID, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Login name.
    pub username: String,
    /// Contact email, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

impl User {
    /// Identity known only by its username.
    #[must_use]
    pub fn from_username(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
        }
    }
}

/// Bearer token issued by the catalog's login endpoint.
///
/// Persisted with the session so the shopper stays signed in, but redacted
/// from `Debug` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Access the raw token, e.g. to build an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_redacts() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6".to_string());
        let debug = format!("{token:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("eyJhbGci"));
        assert_eq!(token.expose(), "eyJhbGciOiJIUzI1NiIsInR5cCI6");
    }

    #[test]
    fn test_user_skips_unknown_fields_when_serializing() {
        let user = User::from_username("mor_2314");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"username":"mor_2314"}"#);
    }
}
