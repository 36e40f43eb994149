//! SQLite storage backend.
//!
//! Uses `rusqlite` for synchronous access and `tokio-rusqlite` to run it off
//! the async runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
