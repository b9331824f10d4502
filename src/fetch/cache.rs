//! URL-keyed cache for raw specification text.
//!
//! Read-mostly, process-wide state: share one `SpecCache` behind an `Arc`.
//! Entries expire after a fixed TTL and the least recently used entry is
//! evicted when the cache is full. There is no invalidation API beyond TTL.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex as TokioMutex;

use crate::config::FetchProperties;

#[derive(Clone)]
struct CacheEntry {
    body: String,
    inserted_at: Instant,
}

impl CacheEntry {
    fn new(body: String) -> Self {
        Self {
            body,
            inserted_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// LRU cache of fetched specifications with TTL expiry
pub struct SpecCache {
    entries: TokioMutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl SpecCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: TokioMutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Build the cache described by `props`, or `None` when caching is disabled
    pub fn from_properties(props: &FetchProperties) -> Option<Self> {
        NonZeroUsize::new(props.cache_size).map(|capacity| Self::new(capacity, props.cache_ttl))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry; expired entries are evicted on the way
    pub async fn get(&self, url: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(url) {
            if !entry.is_expired(self.ttl) {
                return Some(entry.body.clone());
            }
            entries.pop(url);
        }
        None
    }

    pub async fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        let mut entries = self.entries.lock().await;
        entries.put(url.into(), CacheEntry::new(body.into()));
    }

    /// Number of stored entries, expired ones included until they are looked up
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl std::fmt::Debug for SpecCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecCache").field("ttl", &self.ttl).finish()
    }
}
