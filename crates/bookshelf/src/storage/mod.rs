//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `bookshelf_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): ordered maps behind `tokio::sync::RwLock`
//! - `sqlite`: SQLite using `rusqlite` and `tokio-rusqlite`
//!
//! ```bash
//! cargo build -p bookshelf --no-default-features --features sqlite
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p bookshelf --features sqlite"
);

// The in-memory backend also backs the handler tests, whatever the feature set.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
