//! Axum extractors for authentication.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;

use bookshelf_core::auth::{is_session_expired, parse_bearer};
use bookshelf_core::catalog::User;

use crate::{handlers::authz::AuthzError, state::AppState};

/// Extractor for the authenticated caller. Rejects with 401 when the bearer
/// token is missing, unknown or expired.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthzError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .ok_or(AuthzError::MissingToken)?;

        let session = state
            .sessions
            .get_session(&token)
            .await
            .map_err(|e| AuthzError::LookupFailed {
                error: e.to_string(),
            })?
            .ok_or(AuthzError::InvalidToken)?;

        if is_session_expired(&session, Utc::now()) {
            if let Err(e) = state.sessions.delete_session(&token).await {
                tracing::warn!(error = %e, "Failed to drop expired session");
            }
            return Err(AuthzError::SessionExpired);
        }

        let user = state
            .users
            .get_user(session.user_id)
            .await
            .map_err(|e| AuthzError::LookupFailed {
                error: e.to_string(),
            })?
            .ok_or(AuthzError::InvalidToken)?;

        Ok(CurrentUser(user))
    }
}
