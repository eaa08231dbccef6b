//! SearchEngine - cached normalization, variant expansion and matching
//!
//! Raw query → normalized query (cached) → variant set (cached) → matcher,
//! which compares against normalized cell values (cached).

use std::sync::Arc;

use serde::Serialize;

use crate::cache::{CacheService, CacheStats};
use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::matcher::{self, Explanation, MatchKind};
use crate::normalize::{normalize, sanitize};
use crate::variants::{generate_variants, VariantSet};

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatch {
    /// Position of the candidate in the input
    pub index: usize,
    pub score: u32,
    pub kind: MatchKind,
}

/// A ranked record; `field` is the cell that produced the best score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRecord {
    pub index: usize,
    pub field: usize,
    pub score: u32,
    pub kind: MatchKind,
}

/// Thread-safe search engine over a shared [`CacheService`]
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: EngineConfig,
    caches: Arc<CacheService>,
}

impl SearchEngine {
    /// Create an engine with its own caches sized by `config`
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        let caches = Arc::new(CacheService::from_config(&config));
        Self::with_caches(config, caches)
    }

    /// Create an engine over caches shared with other engines
    pub fn with_caches(config: EngineConfig, caches: Arc<CacheService>) -> ConfigResult<Self> {
        config.validate()?;
        debug!(
            variant_mode = %config.variant_mode,
            max_query_len = config.max_query_len,
            max_cell_len = config.max_cell_len,
            "search engine created"
        );
        Ok(Self { config, caches })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn caches(&self) -> &Arc<CacheService> {
        &self.caches
    }

    /// Normalize a raw query (cached by raw input)
    pub fn normalize_query(&self, raw: &str) -> String {
        self.normalized_query(raw).to_string()
    }

    /// Variant set of a raw query (normalizes first; cached by raw input)
    pub fn generate_variants(&self, raw: &str) -> Arc<VariantSet> {
        let raw = sanitize(raw, self.config.max_query_len);
        // engines in different modes may share one cache service
        let key = format!("{}\0{}", self.config.variant_mode, raw);
        self.caches.variants.get_or_insert_with(&key, || {
            let normalized = self.normalized_query(&raw);
            Arc::new(generate_variants(&normalized, self.config.variant_mode))
        })
    }

    /// Normalize a raw cell value; `None` normalizes to `""`
    pub fn normalize_cell_value(&self, raw: Option<&str>) -> String {
        self.normalized_cell(raw).to_string()
    }

    /// True if the cell value matches any variant of the query
    pub fn matches(&self, cell_value: Option<&str>, raw_query: &str) -> bool {
        let cell = self.normalized_cell(cell_value);
        if cell.is_empty() {
            return false;
        }
        matcher::matches(&cell, &self.generate_variants(raw_query))
    }

    /// Relevance of the cell value for the query; 0 means no match
    pub fn score(&self, cell_value: Option<&str>, raw_query: &str) -> u32 {
        let cell = self.normalized_cell(cell_value);
        if cell.is_empty() {
            return 0;
        }
        matcher::score(&cell, &self.generate_variants(raw_query))
    }

    /// The variant and match class behind [`score`](Self::score)
    pub fn explain(&self, cell_value: Option<&str>, raw_query: &str) -> Option<Explanation> {
        let cell = self.normalized_cell(cell_value);
        matcher::explain(&cell, &self.generate_variants(raw_query))
    }

    /// Score every candidate and return the matching ones, best first.
    ///
    /// Ties keep input order. `limit` of `None` returns every match.
    pub fn rank<S: AsRef<str>>(
        &self,
        raw_query: &str,
        candidates: &[S],
        limit: Option<usize>,
    ) -> Vec<RankedMatch> {
        let variants = self.generate_variants(raw_query);
        if variants.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedMatch> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let cell = self.normalized_cell(Some(candidate.as_ref()));
                matcher::explain(&cell, &variants).map(|e| RankedMatch {
                    index,
                    score: e.score,
                    kind: e.kind,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }

    /// Rank records of optional cells; a record scores its best cell.
    pub fn rank_records<R>(
        &self,
        raw_query: &str,
        records: &[R],
        limit: Option<usize>,
    ) -> Vec<RankedRecord>
    where
        R: AsRef<[Option<String>]>,
    {
        let variants = self.generate_variants(raw_query);
        if variants.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedRecord> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let mut best: Option<RankedRecord> = None;
                for (field, value) in record.as_ref().iter().enumerate() {
                    let cell = self.normalized_cell(value.as_deref());
                    let Some(e) = matcher::explain(&cell, &variants) else {
                        continue;
                    };
                    if best.as_ref().map_or(true, |b| e.score > b.score) {
                        best = Some(RankedRecord {
                            index,
                            field,
                            score: e.score,
                            kind: e.kind,
                        });
                    }
                }
                best
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }

    /// Pre-populate the cell value cache; returns how many values were seen.
    pub fn warm_cell_cache<'a, I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let count = values
            .into_iter()
            .map(|v| self.normalized_cell(Some(v)))
            .count();
        debug!(count = count, "cell value cache warmed");
        count
    }

    /// Human-readable size, capacity and hit rate of each cache
    pub fn cache_stats(&self) -> String {
        self.caches.stats().to_string()
    }

    /// Structured cache statistics
    pub fn cache_snapshot(&self) -> CacheStats {
        self.caches.stats()
    }

    /// Drop every cached entry; results are unaffected
    pub fn clear_caches(&self) {
        self.caches.clear();
    }

    /// False when a cache is unusable; the engine keeps working regardless
    pub fn cache_health(&self) -> bool {
        self.caches.is_healthy()
    }

    fn normalized_query(&self, raw: &str) -> Arc<str> {
        let raw = sanitize(raw, self.config.max_query_len);
        self.caches
            .query
            .get_or_insert_with(&raw, || Arc::from(normalize(&raw)))
    }

    fn normalized_cell(&self, raw: Option<&str>) -> Arc<str> {
        let Some(raw) = raw else {
            return Arc::from("");
        };
        let raw = sanitize(raw, self.config.max_cell_len);
        self.caches
            .cell
            .get_or_insert_with(&raw, || Arc::from(normalize(&raw)))
    }
}
