//! Stored credential pair and session representation.

use crate::models::User;
use serde::{Deserialize, Serialize};

/// Access/refresh token pair.
///
/// Both tokens are issued together and rotate together; a session never holds
/// a partial pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a pair from freshly issued tokens.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// The unit of persistence for the credential store: the token pair plus the
/// cached user record. Saved and cleared as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub tokens: TokenPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthSession {
    /// Creates a session for the given token pair with no cached user.
    #[must_use]
    pub fn new(tokens: TokenPair) -> Self {
        Self { tokens, user: None }
    }

    /// Attaches the cached user record.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serde_roundtrip() {
        let session = AuthSession::new(TokenPair::new("a1", "r1"));
        let json = serde_json::to_string(&session).unwrap();
        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tokens.access_token, "a1");
        assert_eq!(back.tokens.refresh_token, "r1");
        assert!(back.user.is_none());
    }

    #[test]
    fn test_serde_skips_absent_user() {
        let session = AuthSession::new(TokenPair::new("a1", "r1"));
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("user"));
    }

    #[test]
    fn test_with_user() {
        let user: User = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();
        let session = AuthSession::new(TokenPair::new("a1", "r1")).with_user(user);
        assert_eq!(session.user.unwrap().id, "u-1");
    }
}
