//! Book endpoints.
//!
//! Reads of the paginated list go through the tag-aware cache. Every
//! successful mutation invalidates the list tag before responding.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use bookshelf_core::cache::{book_list_key, CacheError, CachedValue, BOOK_LIST_TAG};
use bookshelf_core::catalog::{validate_book, Author, BookPayload};
use bookshelf_core::storage::{BookRepository, Pagination, RepositoryError};
use bookshelf_core::views::{deserialize_book_payload, serialize, ViewGroup};

use crate::handlers::{json_bytes, AppError};
use crate::openapi::{BookPayloadView, BookView, ErrorView, ValidationErrorsView};
use crate::state::AppState;
use crate::versioning::RequestedVersion;

/// Query parameters for `GET /api/books`.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /api/books - One page of books, cached per `(page, limit)`.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(
        ("page" = Option<u32>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 10, capped at MAX_PAGE_LIMIT)")
    ),
    responses(
        (status = 200, description = "One page of books, ordered by id", body = [BookView]),
        (status = 400, description = "Zero page or limit", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Response, AppError> {
    let pagination =
        Pagination::from_query(query.page, query.limit, state.config.max_page_limit)?;
    let key = book_list_key(&pagination);

    let payload = state
        .cache
        .get_or_populate(&key, Box::pin(load_book_page(state.books.clone(), pagination)))
        .await?;

    Ok(json_bytes(StatusCode::OK, payload))
}

async fn load_book_page(
    books: Arc<dyn BookRepository>,
    pagination: Pagination,
) -> Result<CachedValue, CacheError> {
    tracing::debug!(
        page = pagination.page(),
        limit = pagination.limit(),
        "Loading book page from storage"
    );
    let page = books.find_all_with_pagination(pagination).await?;
    let payload = serialize(&page, ViewGroup::GetBooks, None)
        .map_err(|e| CacheError::Serialization(e.to_string()))?;
    Ok(CachedValue::new(payload).with_tag(BOOK_LIST_TAG))
}

/// GET /api/books/{id} - A single book, projected for the requested version.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book id"),
        ("version" = Option<String>, Query, description = "Projection version when `Accept` names none")
    ),
    responses(
        (status = 200, description = "The book, projected for the requested version", body = BookView),
        (status = 404, description = "Unknown book", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn get_book(
    State(state): State<AppState>,
    RequestedVersion(version): RequestedVersion,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let book = state
        .books
        .get_book(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Book", id))?;

    let payload = serialize(&book, ViewGroup::GetBooks, Some(version))?;
    Ok(json_bytes(StatusCode::OK, payload))
}

/// POST /api/books - Create a book (admin only).
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = BookPayloadView,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created; `Location` points at the book", body = BookView),
        (status = 400, description = "Invalid payload", body = ValidationErrorsView),
        (status = 401, description = "Missing, unknown or expired token", body = ErrorView),
        (status = 403, description = "Caller is not an admin", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let payload = deserialize_book_payload(&body)?;
    validate_book(&payload)?;

    let author = resolve_author(&state, &payload).await?;
    let new_book = payload.into_new_book(author.as_ref());
    let book = state.books.create_book(&new_book).await?;

    state.cache.invalidate_tags(&[BOOK_LIST_TAG]).await?;
    tracing::info!(book_id = book.id, "Book created");

    let body = serialize(&book, ViewGroup::GetBooks, None)?;
    let location = HeaderValue::try_from(state.config.book_url(book.id))?;
    let mut response = json_bytes(StatusCode::CREATED, body);
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// PUT /api/books/{id} - Replace a book's fields (admin only).
///
/// The librarian comment is kept as stored.
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookPayloadView,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid payload", body = ValidationErrorsView),
        (status = 401, description = "Missing, unknown or expired token", body = ErrorView),
        (status = 403, description = "Caller is not an admin", body = ErrorView),
        (status = 404, description = "Unknown book", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let mut book = state
        .books
        .get_book(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Book", id))?;

    let payload = deserialize_book_payload(&body)?;
    validate_book(&payload)?;

    let author = resolve_author(&state, &payload).await?;
    payload.apply_to(&mut book, author);
    state.books.update_book(&book).await?;

    state.cache.invalidate_tags(&[BOOK_LIST_TAG]).await?;
    tracing::info!(book_id = id, "Book updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/books/{id} - Remove a book (admin only).
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing, unknown or expired token", body = ErrorView),
        (status = 403, description = "Caller is not an admin", body = ErrorView),
        (status = 404, description = "Unknown book", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.books.delete_book(id).await?;

    state.cache.invalidate_tags(&[BOOK_LIST_TAG]).await?;
    tracing::info!(book_id = id, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Looks up the referenced author. An unknown reference yields no author.
async fn resolve_author(
    state: &AppState,
    payload: &BookPayload,
) -> Result<Option<Author>, RepositoryError> {
    let Some(author_id) = payload.id_author else {
        return Ok(None);
    };

    let author = state.authors.get_author(author_id).await?;
    if author.is_none() {
        tracing::debug!(author_id, "Author reference did not resolve");
    }
    Ok(author)
}
