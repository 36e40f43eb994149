//! In-memory storage backend.
//!
//! Stores all data in ordered maps wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted. This is the default backend and the one tests run against.

mod repository;

pub use repository::InMemoryRepository;
