//! Engine configuration
//!
//! Defaults suit an interactive record list: queries up to 1000 characters,
//! cell values up to 2000, and small caches sized for one screen of records.
//!
//! Environment overrides (see [`EngineConfig::from_env`]):
//! - `TAGSEARCH_VARIANT_MODE`: `strict` or `extended` (default: strict)
//! - `TAGSEARCH_MAX_QUERY_LEN`: query truncation limit in chars (default: 1000)
//! - `TAGSEARCH_MAX_CELL_LEN`: cell truncation limit in chars (default: 2000)
//! - `TAGSEARCH_QUERY_CACHE_SIZE`: normalized query cache entries (default: 200)
//! - `TAGSEARCH_VARIANTS_CACHE_SIZE`: variant set cache entries (default: 100)
//! - `TAGSEARCH_CELL_CACHE_SIZE`: normalized cell cache entries (default: 300)

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_CELL_CAPACITY, DEFAULT_QUERY_CAPACITY, DEFAULT_VARIANTS_CAPACITY};
use crate::error::{ConfigError, ConfigResult};
use crate::variants::VariantMode;

/// Default query truncation limit (chars)
pub const DEFAULT_MAX_QUERY_LEN: usize = 1000;
/// Default cell value truncation limit (chars)
pub const DEFAULT_MAX_CELL_LEN: usize = 2000;

/// Search engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Variant generation policy
    pub variant_mode: VariantMode,
    /// Longer queries are truncated to this many chars
    pub max_query_len: usize,
    /// Longer cell values are truncated to this many chars
    pub max_cell_len: usize,
    /// Capacity of the normalized query cache (0 disables it)
    pub query_cache_capacity: usize,
    /// Capacity of the variant set cache (0 disables it)
    pub variants_cache_capacity: usize,
    /// Capacity of the normalized cell value cache (0 disables it)
    pub cell_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variant_mode: VariantMode::Strict,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
            max_cell_len: DEFAULT_MAX_CELL_LEN,
            query_cache_capacity: DEFAULT_QUERY_CAPACITY,
            variants_cache_capacity: DEFAULT_VARIANTS_CAPACITY,
            cell_cache_capacity: DEFAULT_CELL_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Defaults with the given variant mode
    pub fn with_mode(variant_mode: VariantMode) -> Self {
        Self {
            variant_mode,
            ..Default::default()
        }
    }

    /// Defaults overridden by `TAGSEARCH_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            variant_mode: parse_var(&lookup, "TAGSEARCH_VARIANT_MODE")?
                .unwrap_or(defaults.variant_mode),
            max_query_len: parse_var(&lookup, "TAGSEARCH_MAX_QUERY_LEN")?
                .unwrap_or(defaults.max_query_len),
            max_cell_len: parse_var(&lookup, "TAGSEARCH_MAX_CELL_LEN")?
                .unwrap_or(defaults.max_cell_len),
            query_cache_capacity: parse_var(&lookup, "TAGSEARCH_QUERY_CACHE_SIZE")?
                .unwrap_or(defaults.query_cache_capacity),
            variants_cache_capacity: parse_var(&lookup, "TAGSEARCH_VARIANTS_CACHE_SIZE")?
                .unwrap_or(defaults.variants_cache_capacity),
            cell_cache_capacity: parse_var(&lookup, "TAGSEARCH_CELL_CACHE_SIZE")?
                .unwrap_or(defaults.cell_cache_capacity),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would truncate every input to nothing
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_query_len == 0 {
            return Err(ConfigError::ZeroLimit("max_query_len"));
        }
        if self.max_cell_len == 0 {
            return Err(ConfigError::ZeroLimit("max_cell_len"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { var, value }),
    }
}
