use thiserror::Error;

/// Errors that can occur when building a [`Pagination`](super::Pagination).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page: pages start at 1")]
    ZeroPage,
    #[error("Invalid limit: limit must be at least 1")]
    ZeroLimit,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shortcut for a missing record keyed by a numeric ID.
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_error_display() {
        assert_eq!(
            PaginationError::ZeroPage.to_string(),
            "Invalid page: pages start at 1"
        );
        assert_eq!(
            PaginationError::ZeroLimit.to_string(),
            "Invalid limit: limit must be at least 1"
        );
    }

    #[test]
    fn test_not_found_shortcut() {
        let error = RepositoryError::not_found("Book", 42);
        assert_eq!(error.to_string(), "Book not found: 42");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "admin@bookshelf.local".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "User already exists: admin@bookshelf.local"
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("database is locked".to_string());
        assert_eq!(error.to_string(), "Connection failed: database is locked");
    }
}
