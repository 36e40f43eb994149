//! Token login.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use bookshelf_core::auth::{new_session, verify_password, LoginRequest, LoginResponse};

use crate::handlers::authz::AuthzError;
use crate::handlers::AppError;
use crate::openapi::{ErrorView, LoginRequestView, LoginResponseView};
use crate::state::AppState;

/// POST /api/login_check - Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login_check",
    tag = "auth",
    request_body = LoginRequestView,
    responses(
        (status = 200, description = "Bearer session token", body = LoginResponseView),
        (status = 401, description = "Bad credentials", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    let user = state
        .users
        .get_user_by_email(&request.username)
        .await
        .map_err(|e| AppError::from(e).into_response())?
        .ok_or_else(|| {
            tracing::debug!(username = %request.username, "Login for unknown user");
            AuthzError::BadCredentials.into_response()
        })?;

    let hash = user.password_hash.clone();
    let password = request.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    if !valid {
        tracing::debug!(user_id = user.id, "Login with wrong password");
        return Err(AuthzError::BadCredentials.into_response());
    }

    let session = new_session(user.id, Utc::now(), state.config.session_ttl());
    state
        .sessions
        .create_session(&session)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        token: session.token.as_str().to_string(),
    }))
}
