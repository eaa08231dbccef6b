//! Search caches
//!
//! Three independent LRU caches, each keyed by the raw (sanitized) input so
//! repeated keystrokes skip recomputation entirely:
//!
//! - `query`: raw query → normalized query
//! - `variants`: raw query → variant set
//! - `cell`: raw cell value → normalized cell value
//!
//! [`CacheService`] is created once by the application and shared through an
//! `Arc` with every engine that should see the same caches.

mod bounded;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::variants::VariantSet;

pub use bounded::BoundedCache;

/// Default query cache capacity
pub const DEFAULT_QUERY_CAPACITY: usize = 200;
/// Default variant set cache capacity
pub const DEFAULT_VARIANTS_CAPACITY: usize = 100;
/// Default cell value cache capacity
pub const DEFAULT_CELL_CAPACITY: usize = 300;

/// The three caches behind a search engine
#[derive(Debug)]
pub struct CacheService {
    pub(crate) query: BoundedCache<Arc<str>>,
    pub(crate) variants: BoundedCache<Arc<VariantSet>>,
    pub(crate) cell: BoundedCache<Arc<str>>,
}

impl Default for CacheService {
    fn default() -> Self {
        Self::new(
            DEFAULT_QUERY_CAPACITY,
            DEFAULT_VARIANTS_CAPACITY,
            DEFAULT_CELL_CAPACITY,
        )
    }
}

impl CacheService {
    /// Create caches with explicit capacities (0 disables a cache)
    pub fn new(query_capacity: usize, variants_capacity: usize, cell_capacity: usize) -> Self {
        Self {
            query: BoundedCache::new("query", query_capacity),
            variants: BoundedCache::new("variants", variants_capacity),
            cell: BoundedCache::new("cell", cell_capacity),
        }
    }

    /// Create caches sized by an engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.query_cache_capacity,
            config.variants_cache_capacity,
            config.cell_cache_capacity,
        )
    }

    /// Caches that never store anything
    pub fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Drop all cached entries (counters are kept)
    pub fn clear(&self) {
        self.query.evict_all();
        self.variants.evict_all();
        self.cell.evict_all();
        debug!("search caches cleared");
    }

    /// True when every cache is usable. Never panics.
    pub fn is_healthy(&self) -> bool {
        let unhealthy: Vec<&'static str> = [
            (self.query.name(), self.query.is_healthy()),
            (self.variants.name(), self.variants.is_healthy()),
            (self.cell.name(), self.cell.is_healthy()),
        ]
        .into_iter()
        .filter_map(|(name, ok)| (!ok).then_some(name))
        .collect();

        if unhealthy.is_empty() {
            true
        } else {
            warn!(caches = ?unhealthy, "search cache health check failed");
            false
        }
    }

    /// Point-in-time statistics for every cache
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            query: CacheSnapshot::of(&self.query),
            variants: CacheSnapshot::of(&self.variants),
            cell: CacheSnapshot::of(&self.cell),
        }
    }
}

/// Statistics of one cache
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheSnapshot {
    pub name: &'static str,
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl CacheSnapshot {
    fn of<V: Clone>(cache: &BoundedCache<V>) -> Self {
        Self {
            name: cache.name(),
            size: cache.size(),
            capacity: cache.capacity(),
            hits: cache.hit_count(),
            misses: cache.miss_count(),
            hit_rate: cache.hit_rate(),
        }
    }
}

impl fmt::Display for CacheSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} entries, {} hits, {} misses, hit rate {:.1}%",
            self.name,
            self.size,
            self.capacity,
            self.hits,
            self.misses,
            self.hit_rate * 100.0
        )
    }
}

/// Statistics of all three caches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub query: CacheSnapshot,
    pub variants: CacheSnapshot,
    pub cell: CacheSnapshot,
}

impl CacheStats {
    /// JSON form for monitoring endpoints
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}; {}", self.query, self.variants, self.cell)
    }
}
