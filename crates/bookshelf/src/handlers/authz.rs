//! Role gate for catalog mutations.
//!
//! Returns 401 when the caller cannot be identified and 403 when they are
//! identified but lack the admin role. The gate runs before the request body
//! is read, so a rejected request never touches storage.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use bookshelf_core::catalog::Role;

use crate::auth::CurrentUser;

/// Authentication or authorization failure.
#[derive(Debug)]
pub enum AuthzError {
    /// No usable `Authorization: Bearer` header.
    MissingToken,
    /// Token does not match a live session or its user is gone.
    InvalidToken,
    SessionExpired,
    /// Login attempt with an unknown user or a wrong password.
    BadCredentials,
    /// Caller is authenticated but lacks the required role.
    InsufficientRole { user_id: i64, required: Role },
    /// Session or user lookup failed (internal error).
    LookupFailed { error: String },
}

impl AuthzError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "JWT Token not found"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            Self::SessionExpired => (StatusCode::UNAUTHORIZED, "Expired token"),
            Self::BadCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials."),
            Self::InsufficientRole { .. } => (
                StatusCode::FORBIDDEN,
                "You do not have sufficient rights to perform this action",
            ),
            Self::LookupFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authorization check failed",
            ),
        }
    }
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        match &self {
            Self::InsufficientRole { user_id, required } => {
                tracing::warn!(
                    user_id = user_id,
                    required = %required,
                    "Authorization denied: insufficient role"
                );
            }
            Self::LookupFailed { error } => {
                tracing::error!(error = %error, "Authorization lookup failed");
            }
            other => {
                tracing::debug!(reason = ?other, "Authentication failed");
            }
        }

        let (status, message) = self.status_and_message();
        (
            status,
            Json(serde_json::json!({
                "status": status.as_u16(),
                "message": message,
            })),
        )
            .into_response()
    }
}

/// Middleware that lets only admins through.
pub async fn require_admin(
    CurrentUser(user): CurrentUser,
    request: Request,
    next: Next,
) -> Result<Response, AuthzError> {
    if !user.is_admin() {
        return Err(AuthzError::InsufficientRole {
            user_id: user.id,
            required: Role::Admin,
        });
    }

    tracing::debug!(user_id = user.id, "Admin access granted");
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthzError::MissingToken.status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthzError::SessionExpired.status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthzError::InsufficientRole {
                user_id: 1,
                required: Role::Admin
            }
            .status_and_message()
            .0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthzError::LookupFailed {
                error: "gone".into()
            }
            .status_and_message()
            .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
