use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The populate callback failed reading the repository. Nothing was stored.
    #[error("Cache population failed: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
