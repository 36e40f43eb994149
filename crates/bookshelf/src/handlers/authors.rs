//! Author endpoints. Not cached.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use bookshelf_core::storage::RepositoryError;
use bookshelf_core::views::{serialize, AuthorWithBooks, ViewGroup};

use crate::handlers::{json_bytes, AppError};
use crate::openapi::{AuthorSummaryView, AuthorView, ErrorView};
use crate::state::AppState;

/// GET /api/authors - All authors with their books.
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Every author with their books", body = [AuthorView])
    )
)]
#[axum::debug_handler]
pub async fn list_authors(State(state): State<AppState>) -> Result<Response, AppError> {
    let authors = state.authors.list_authors().await?;

    let mut shelves = Vec::with_capacity(authors.len());
    for author in &authors {
        let books = state.books.list_books_by_author(author.id).await?;
        shelves.push((author, books));
    }

    let views: Vec<AuthorWithBooks<'_>> = shelves
        .iter()
        .map(|(author, books)| AuthorWithBooks {
            author,
            books: books.as_slice(),
        })
        .collect();

    let payload = serialize(&views, ViewGroup::GetAuthors, None)?;
    Ok(json_bytes(StatusCode::OK, payload))
}

/// GET /api/authors/{id} - A single author without their books.
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author", body = AuthorSummaryView),
        (status = 404, description = "Unknown author", body = ErrorView)
    )
)]
#[axum::debug_handler]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let author = state
        .authors
        .get_author(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Author", id))?;

    let payload = serialize(&author, ViewGroup::GetBooks, None)?;
    Ok(json_bytes(StatusCode::OK, payload))
}
