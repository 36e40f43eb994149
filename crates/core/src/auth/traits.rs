use async_trait::async_trait;

use super::{AuthError, Session, SessionToken};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Session storage abstraction.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session.
    async fn create_session(&self, session: &Session) -> Result<()>;

    /// Retrieve session by token.
    async fn get_session(&self, token: &SessionToken) -> Result<Option<Session>>;

    /// Delete a specific session.
    async fn delete_session(&self, token: &SessionToken) -> Result<()>;
}
