//! Cache backend implementations.
//!
//! Concrete implementations of `bookshelf_core::cache::TagAwareCache`.
//! Only the in-process backend exists; a single instance owns its cache.

pub mod memory;

pub use memory::MemoryTagCache;
