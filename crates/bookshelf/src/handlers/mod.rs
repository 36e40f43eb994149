pub mod authors;
pub mod authz;
pub mod books;
pub mod error;
pub mod health;
pub mod login;

pub use error::AppError;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Wraps pre-serialized JSON bytes in a response.
pub(crate) fn json_bytes(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
