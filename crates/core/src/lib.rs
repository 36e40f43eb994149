//! Functional core for the bookshelf catalog API.
//!
//! Pure domain types and traits, no I/O:
//! - `catalog`: authors, books, users, request payloads and validation
//! - `cache`: cache keys, invalidation tags and the tag-aware cache contract
//! - `storage`: repository traits, pagination and error mapping
//! - `views`: view groups and versioned JSON projections
//! - `auth` (feature `auth`): roles, sessions and password hashing

#[cfg(feature = "auth")]
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod storage;
pub mod views;
