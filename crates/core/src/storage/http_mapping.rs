//! Maps repository errors to HTTP status codes. Pure, no side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
/// - `InvalidData` -> 400
///
/// # Examples
///
/// ```
/// use bookshelf_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Book", 7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (RepositoryError::not_found("Author", 1), 404),
            (
                RepositoryError::AlreadyExists {
                    entity_type: "User",
                    id: "user@bookshelf.local".to_string(),
                },
                409,
            ),
            (RepositoryError::ConnectionFailed("pool closed".into()), 503),
            (RepositoryError::QueryFailed("syntax error".into()), 500),
            (RepositoryError::Serialization("bad roles column".into()), 500),
            (RepositoryError::InvalidData("negative id".into()), 400),
        ];

        for (error, expected) in cases {
            assert_eq!(repository_error_to_status_code(&error), expected, "{error}");
        }
    }
}
