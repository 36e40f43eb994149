use thiserror::Error;

/// Errors that can occur rendering a view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::Serialization(err.to_string())
    }
}
