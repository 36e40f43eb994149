use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde::Serialize;

use super::Result;

/// What a populate callback hands back to the cache on a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    pub payload: Vec<u8>,
    pub tags: Vec<String>,
}

impl CachedValue {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            tags: Vec::new(),
        }
    }

    /// Adds an invalidation tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A deferred population. It only runs if the cache misses.
pub type PopulateFuture<'a> = Pin<Box<dyn Future<Output = Result<CachedValue>> + Send + 'a>>;

/// Point-in-time counters for a cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub populations: u64,
    pub invalidations: u64,
    /// Populations whose result was returned but not stored because one of
    /// their tags was invalidated while they ran.
    pub discarded: u64,
}

/// A response cache whose entries carry tags for bulk invalidation.
#[async_trait]
pub trait TagAwareCache: Send + Sync {
    /// Returns the payload cached under `key`, running `populate` on a miss.
    ///
    /// At most one population per key runs at a time. Concurrent callers for
    /// a cold key wait for it and observe its payload. A failed population
    /// stores nothing and the error goes to the caller that ran it.
    async fn get_or_populate<'a>(&self, key: &str, populate: PopulateFuture<'a>)
        -> Result<Vec<u8>>;

    /// Removes every entry carrying any of `tags`. Returns how many were removed.
    ///
    /// Once this returns, no read observes a removed entry.
    async fn invalidate_tags(&self, tags: &[&str]) -> Result<usize>;

    /// Returns the current counters.
    fn stats(&self) -> CacheStats;
}
