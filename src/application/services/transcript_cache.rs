use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::CacheKey;

/// Cache of transcription results keyed by request fingerprint.
pub type TranscriptCache = BoundedTtlCache<String>;

/// Thread-safe cache bounded by entry count and idle time.
///
/// Expired entries are swept lazily at the start of every operation. When the
/// cache is full, `set` evicts the least recently accessed entry.
pub struct BoundedTtlCache<V> {
    inner: Mutex<LruCache<CacheKey, CacheEntry<V>>>,
    max_size: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct CacheEntry<V> {
    value: V,
    last_access: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub ttl_seconds: u64,
    pub hits: u64,
    pub misses: u64,
}

// Recency order matches `last_access` order, so expired entries always sit at
// the LRU end.
fn sweep_expired<V>(
    cache: &mut LruCache<CacheKey, CacheEntry<V>>,
    now: Instant,
    ttl: Duration,
) -> usize {
    let mut removed = 0;
    while let Some((_, entry)) = cache.peek_lru() {
        if now.saturating_duration_since(entry.last_access) < ttl {
            break;
        }
        cache.pop_lru();
        removed += 1;
    }
    removed
}

impl<V: Clone> BoundedTtlCache<V> {
    /// `max_size` is clamped to at least one entry. A zero `ttl` disables reuse.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            max_size: capacity.get(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let mut cache = self.inner.lock();
        let now = Instant::now();
        sweep_expired(&mut cache, now, self.ttl);

        match cache.get_mut(key) {
            Some(entry) => {
                entry.last_access = now;
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn set(&self, key: CacheKey, value: V) {
        let mut cache = self.inner.lock();
        let now = Instant::now();
        sweep_expired(&mut cache, now, self.ttl);

        if self.ttl.is_zero() {
            return;
        }

        cache.pop(&key);
        while cache.len() >= self.max_size {
            match cache.pop_lru() {
                Some((evicted, _)) => {
                    tracing::debug!(key = %evicted.short(), "Evicted least recently used entry")
                }
                None => break,
            }
        }

        cache.put(
            key,
            CacheEntry {
                value,
                last_access: now,
            },
        );
    }

    /// Removes every entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut cache = self.inner.lock();
        let removed = cache.len();
        cache.clear();
        removed
    }

    /// Live entry count, after sweeping expired ones.
    pub fn size(&self) -> usize {
        let mut cache = self.inner.lock();
        sweep_expired(&mut cache, Instant::now(), self.ttl);
        cache.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.size(),
            max_size: self.max_size,
            ttl_seconds: self.ttl.as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
