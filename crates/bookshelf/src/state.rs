//! Shared application state.
//!
//! Handlers receive repository and cache trait objects. The storage backend
//! is chosen at compile time; the response cache is always in-process.

use std::sync::Arc;

use bookshelf_core::auth::SessionRepository;
use bookshelf_core::cache::TagAwareCache;
use bookshelf_core::storage::{AuthorRepository, BookRepository, UserRepository};

use crate::auth::SessionStore;
use crate::cache::MemoryTagCache;
use crate::config::Config;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Login sessions. Always in-memory.
    pub sessions: Arc<dyn SessionRepository>,
    /// Response cache for the paginated book list.
    pub cache: Arc<dyn TagAwareCache>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires a repository that serves all three entity kinds.
    fn build<R>(repo: Arc<R>, config: &Config) -> Self
    where
        R: AuthorRepository + BookRepository + UserRepository + 'static,
    {
        let cache =
            MemoryTagCache::new(config.cache_max_entries).with_ttl(config.cache_ttl());

        Self {
            authors: repo.clone(),
            books: repo.clone(),
            users: repo,
            sessions: Arc::new(SessionStore::new()),
            cache: Arc::new(cache),
            config: Arc::new(config.clone()),
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!("Using in-memory storage");
            Ok(Self::build(Arc::new(InMemoryRepository::new()), config))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            Ok(Self::build(Arc::new(repo), config))
        }
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory state for handler tests, independent of the feature set.
    pub fn for_tests(config: Config) -> Self {
        Self::build(Arc::new(crate::storage::InMemoryRepository::new()), &config)
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::for_tests(Config::default())
    }
}
