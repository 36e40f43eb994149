use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookshelf_core::cache::CacheError;
use bookshelf_core::catalog::ValidationErrors;
use bookshelf_core::storage::{repository_error_to_status_code, PaginationError, RepositoryError};

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(CacheError::Repository(repo_error)) = self.0.downcast_ref::<CacheError>()
        {
            repository_error_to_status_code(repo_error)
        } else if self.0.downcast_ref::<PaginationError>().is_some() {
            400
        } else {
            500
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            tracing::warn!(violations = errors.violations.len(), "Validation failed");
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self.0, "API error");
        }

        let body = serde_json::json!({
            "status": status.as_u16(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
