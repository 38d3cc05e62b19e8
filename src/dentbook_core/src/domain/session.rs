use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::user::User;

/// Opaque bearer token. Never empty.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn parse(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(Secret::new(token)))
        }
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

// Persisting the session is the one place the token leaves the secret wrapper.
impl Serialize for SessionToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl<'de> Deserialize<'de> for SessionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Self::parse(token).ok_or_else(|| serde::de::Error::custom("session token is empty"))
    }
}

/// Proof of authentication: the profile and its bearer token, always together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user: User,
    token: SessionToken,
}

impl Session {
    pub fn new(user: User, token: SessionToken) -> Self {
        Self { user, token }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::UserId;

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("   ").is_none());
    }

    #[test]
    fn test_bearer_header() {
        let token = SessionToken::parse("abc123").unwrap();
        assert_eq!(token.bearer_header(), "Bearer abc123");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::parse("abc123").unwrap();
        assert!(!format!("{token:?}").contains("abc123"));
    }

    #[test]
    fn test_session_without_token_does_not_deserialize() {
        let raw = r#"{"user":{"id":1},"token":""}"#;
        assert!(serde_json::from_str::<Session>(raw).is_err());

        let raw = r#"{"user":{"id":1},"token":"t"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.user().id, UserId::from(1));
    }
}
