use std::sync::Arc;
use tokio::sync::RwLock;

use dentbook_core::{Session, SessionStore, SessionStoreError};

#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: Session) -> Result<(), SessionStoreError> {
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.session.write().await.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentbook_core::{SessionToken, User, UserId};

    fn session(token: &str) -> Session {
        let user = User {
            id: UserId::from(1),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@test.com".to_string(),
            phone: None,
            dob: None,
            is_doctor: false,
            avatar_url: None,
        };
        Session::new(user, SessionToken::parse(token).unwrap())
    }

    #[tokio::test]
    async fn test_set_replaces_previous_session() {
        let store = InMemorySessionStore::new();
        store.set(session("first")).await.unwrap();
        store.set(session("second")).await.unwrap();

        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.token(), &SessionToken::parse("second").unwrap());
    }

    #[tokio::test]
    async fn test_clear_when_empty() {
        let store = InMemorySessionStore::new();
        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }
}
