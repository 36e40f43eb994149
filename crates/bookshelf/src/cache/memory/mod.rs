//! In-memory tag-aware response cache with LRU eviction and optional TTL.

mod cache;

pub use cache::MemoryTagCache;
