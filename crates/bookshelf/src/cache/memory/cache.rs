//! In-memory tag-aware cache.
//!
//! One lock guards both the entry store and the tag index, so a tag
//! invalidation is atomic with respect to readers. Populations are
//! single-flight per key through a per-key async mutex.
//!
//! Every invalidation bumps a global epoch and records it against the
//! invalidated tags. A population remembers the epoch it started at and is
//! only stored if none of its tags were invalidated since, so a slow
//! population cannot write pre-invalidation data back into the cache.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::{Mutex, RwLock};

use bookshelf_core::cache::{CacheStats, CachedValue, PopulateFuture, Result, TagAwareCache};

/// A stored payload with its tags and optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<u8>,
    tags: Vec<String>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: CachedValue, ttl: Option<Duration>) -> Self {
        Self {
            payload: value.payload,
            tags: value.tags,
            expires_at: ttl.map(|d| Instant::now() + d),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

#[derive(Debug)]
struct CacheState {
    store: LruCache<String, CacheEntry>,
    /// tag -> keys carrying it
    tags: HashMap<String, HashSet<String>>,
    epoch: u64,
    /// tag -> epoch of its last invalidation
    invalidated_at: HashMap<String, u64>,
}

impl CacheState {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            store: LruCache::new(capacity),
            tags: HashMap::new(),
            epoch: 0,
            invalidated_at: HashMap::new(),
        }
    }

    fn unindex(&mut self, key: &str, tags: &[String]) {
        for tag in tags {
            if let Some(keys) = self.tags.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tags.remove(tag);
                }
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(entry) = self.store.pop(key) {
            self.unindex(key, &entry.tags);
        }
    }

    fn insert(&mut self, key: &str, entry: CacheEntry) {
        self.remove(key);
        for tag in &entry.tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
        if let Some((evicted_key, evicted)) = self.store.push(key.to_string(), entry) {
            self.unindex(&evicted_key, &evicted.tags);
        }
    }

    fn invalidated_since(&self, tags: &[String], epoch: u64) -> bool {
        tags.iter()
            .any(|tag| self.invalidated_at.get(tag).is_some_and(|&at| at > epoch))
    }
}

#[derive(Debug, Default)]
struct Counters {
    entries: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    populations: AtomicU64,
    invalidations: AtomicU64,
    discarded: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            populations: self.populations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

/// In-memory [`TagAwareCache`] with LRU eviction and optional TTL.
///
/// Cloning is cheap and clones share the same store.
#[derive(Debug, Clone)]
pub struct MemoryTagCache {
    state: Arc<RwLock<CacheState>>,
    in_flight: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    ttl: Option<Duration>,
    counters: Arc<Counters>,
}

impl MemoryTagCache {
    /// Creates a cache holding at most `max_entries` entries (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Arc::new(RwLock::new(CacheState::new(capacity))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            ttl: None,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Expires entries `ttl` after they are stored. A zero TTL disables expiry.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = (!ttl.is_zero()).then_some(ttl);
        self
    }

    /// Hits are served under the read lock. Only an expired entry takes the
    /// write lock, to drop it.
    async fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let fresh = {
            let state = self.state.read().await;
            match state.store.peek(key) {
                None => return None,
                Some(entry) if entry.is_expired() => None,
                Some(entry) => Some(entry.payload.clone()),
            }
        };
        if let Some(payload) = fresh {
            self.promote(key);
            return Some(payload);
        }

        let mut state = self.state.write().await;
        if state.store.peek(key).is_some_and(CacheEntry::is_expired) {
            tracing::trace!(key, "Cache entry expired");
            state.remove(key);
            self.sync_len(&state);
        }
        None
    }

    /// Marks `key` as recently used. Skipped when the store is contended,
    /// so LRU order is approximate under load.
    fn promote(&self, key: &str) {
        if let Ok(mut state) = self.state.try_write() {
            state.store.promote(key);
        }
    }

    async fn store(&self, key: &str, value: CachedValue, started_at: u64) -> Vec<u8> {
        let mut state = self.state.write().await;
        if state.invalidated_since(&value.tags, started_at) {
            Counters::bump(&self.counters.discarded);
            tracing::debug!(key, "Discarding population invalidated while in flight");
            return value.payload;
        }
        let payload = value.payload.clone();
        state.insert(key, CacheEntry::new(value, self.ttl));
        self.sync_len(&state);
        payload
    }

    fn sync_len(&self, state: &CacheState) {
        self.counters
            .entries
            .store(state.store.len() as u64, Ordering::Relaxed);
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn release_key_lock(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // Only the map and this caller hold it: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            in_flight.remove(key);
        }
    }

    async fn populate_locked(&self, key: &str, populate: PopulateFuture<'_>) -> Result<Vec<u8>> {
        if let Some(payload) = self.lookup(key).await {
            Counters::bump(&self.counters.hits);
            return Ok(payload);
        }

        Counters::bump(&self.counters.misses);
        let started_at = self.state.read().await.epoch;

        let value = populate.await?;
        Counters::bump(&self.counters.populations);
        tracing::debug!(key, tags = ?value.tags, bytes = value.payload.len(), "Cache populated");

        Ok(self.store(key, value, started_at).await)
    }
}

#[async_trait]
impl TagAwareCache for MemoryTagCache {
    async fn get_or_populate<'a>(
        &self,
        key: &str,
        populate: PopulateFuture<'a>,
    ) -> Result<Vec<u8>> {
        if let Some(payload) = self.lookup(key).await {
            Counters::bump(&self.counters.hits);
            tracing::trace!(key, "Cache hit");
            return Ok(payload);
        }

        let lock = self.key_lock(key).await;
        let result = {
            let _guard = lock.lock().await;
            self.populate_locked(key, populate).await
        };
        self.release_key_lock(key, lock).await;

        result
    }

    async fn invalidate_tags(&self, tags: &[&str]) -> Result<usize> {
        let mut state = self.state.write().await;
        state.epoch += 1;
        let epoch = state.epoch;

        let mut removed = 0;
        for tag in tags {
            state.invalidated_at.insert((*tag).to_string(), epoch);
            let keys = state.tags.remove(*tag).unwrap_or_default();
            for key in keys {
                if state.store.contains(&key) {
                    state.remove(&key);
                    removed += 1;
                }
            }
        }
        self.sync_len(&state);
        drop(state);

        Counters::bump(&self.counters.invalidations);
        tracing::debug!(?tags, removed, "Cache tags invalidated");
        Ok(removed)
    }

    fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}
