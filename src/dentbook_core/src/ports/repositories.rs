use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::Session;

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session storage unavailable: {0}")]
    Io(String),
    #[error("Stored session is corrupted: {0}")]
    Corrupted(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Io(_), Self::Io(_))
                | (Self::Corrupted(_), Self::Corrupted(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Client-local persistence of the current session.
///
/// `set` replaces user and token as one unit and `clear` removes both; an
/// implementation must never leave one without the other.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<Session>, SessionStoreError>;
    async fn set(&self, session: Session) -> Result<(), SessionStoreError>;
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
