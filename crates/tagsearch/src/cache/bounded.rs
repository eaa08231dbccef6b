//! Thread-safe bounded LRU cache with hit/miss counters

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ahash::RandomState;
use lru::LruCache;
use parking_lot::Mutex;

/// How long a caller waits for a cache lock before going uncached
const LOCK_TIMEOUT: Duration = Duration::from_millis(50);

/// Capacity-bounded LRU map from raw input strings to derived values.
///
/// The mutex covers every access, including the recency update performed by
/// `get`. A capacity of zero disables the cache: lookups miss and puts are
/// dropped.
pub struct BoundedCache<V> {
    name: &'static str,
    capacity: usize,
    entries: Option<Mutex<LruCache<String, V, RandomState>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let entries = NonZeroUsize::new(capacity)
            .map(|cap| Mutex::new(LruCache::with_hasher(cap, RandomState::new())));
        Self {
            name,
            capacity,
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&self, key: &str) -> Option<V> {
        let found = self
            .entries
            .as_ref()
            .and_then(|m| m.try_lock_for(LOCK_TIMEOUT))
            .and_then(|mut cache| cache.get(key).cloned());

        match found {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(cache = self.name, "cache miss");
                None
            }
        }
    }

    /// Insert `value`, evicting the least recently used entry when full.
    pub fn put(&self, key: &str, value: V) {
        let Some(entries) = &self.entries else {
            return;
        };
        match entries.try_lock_for(LOCK_TIMEOUT) {
            Some(mut cache) => {
                cache.put(key.to_string(), value);
            }
            None => warn!(cache = self.name, "cache lock contended, skipping insert"),
        }
    }

    /// Return the cached value for `key`, computing and inserting it on a miss.
    ///
    /// `compute` runs outside the lock; concurrent misses for the same key
    /// compute the same value and the last insert wins.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Drop every entry. Counters are kept.
    ///
    /// Skipped with a warning if the lock is held past the timeout.
    pub fn evict_all(&self) {
        let Some(entries) = &self.entries else {
            return;
        };
        match entries.try_lock_for(LOCK_TIMEOUT) {
            Some(mut cache) => cache.clear(),
            None => warn!(cache = self.name, "cache lock contended, skipping clear"),
        }
    }

    /// Current entry count; 0 if the lock is held past the timeout.
    pub fn size(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|m| m.try_lock_for(LOCK_TIMEOUT))
            .map_or(0, |cache| cache.len())
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hits over lookups, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hit_count();
        let total = hits + self.miss_count();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Lock is obtainable and the entry count is within capacity.
    pub fn is_healthy(&self) -> bool {
        let Some(entries) = &self.entries else {
            return true;
        };
        match entries.try_lock_for(LOCK_TIMEOUT) {
            Some(cache) => cache.len() <= self.capacity,
            None => false,
        }
    }
}

impl<V> std::fmt::Debug for BoundedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
