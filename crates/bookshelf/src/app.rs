use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{
        authors::{get_author, list_authors},
        authz::require_admin,
        books::{create_book, delete_book, get_book, list_books, update_book},
        health::{healthz, livez},
        login::login,
    },
    openapi::ApiDoc,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public reads and login
    let public_routes = Router::new()
        .route("/authors", get(list_authors))
        .route("/authors/{id}", get(get_author))
        .route("/books", get(list_books))
        .route("/books/{id}", get(get_book))
        .route("/login_check", post(login));

    // Catalog mutations, admin only
    let admin_routes = Router::new()
        .route("/books", post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let api_routes = public_routes.merge(admin_routes).layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/api/doc").url("/api/doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
