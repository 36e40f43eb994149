//! In-memory session storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use bookshelf_core::auth::{is_session_expired, Result, Session, SessionRepository, SessionToken};

/// In-memory session store.
///
/// Sessions live in a HashMap wrapped in `Arc<RwLock<_>>` and are lost on
/// restart, whatever the storage backend. Expired sessions are dropped when
/// presented and swept on every new login.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !is_session_expired(s, now));
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "Expired sessions removed");
        }
        sessions.insert(session.token.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn get_session(&self, token: &SessionToken) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token.as_str()).cloned())
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::auth::new_session;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_get_delete_session() {
        let store = SessionStore::new();
        let session = new_session(1, Utc::now(), Duration::hours(1));

        store.create_session(&session).await.unwrap();
        assert_eq!(
            store.get_session(&session.token).await.unwrap(),
            Some(session.clone())
        );

        store.delete_session(&session.token).await.unwrap();
        assert!(store.get_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_sweeps_expired_sessions() {
        let store = SessionStore::new();
        let mut stale = new_session(1, Utc::now(), Duration::hours(1));
        stale.expires_at = Utc::now() - Duration::seconds(1);
        store.create_session(&stale).await.unwrap();

        let fresh = new_session(2, Utc::now(), Duration::hours(1));
        store.create_session(&fresh).await.unwrap();

        assert!(store.get_session(&stale.token).await.unwrap().is_none());
        assert!(store.get_session(&fresh.token).await.unwrap().is_some());
        assert_eq!(store.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = SessionStore::new();
        let token = SessionToken::new("nope");
        assert!(store.get_session(&token).await.unwrap().is_none());
    }
}
