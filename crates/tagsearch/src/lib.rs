//! tagsearch
//!
//! Confusable-tolerant search for equipment and valve tags stored in free-text
//! record fields. A query like "C-20", "с 20" or "С20" finds "С-20 Клапан"
//! regardless of Latin/Cyrillic look-alikes, dash glyphs, stray punctuation or
//! case.
//!
//! # Pipeline
//!
//! raw query → [`normalize`] → [`variants`] → [`matcher`] ← normalized cell
//!
//! with the normalized query, the variant set and the normalized cell value
//! each held in its own LRU cache ([`cache`]).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tagsearch::{CacheService, EngineConfig, SearchEngine};
//!
//! let caches = Arc::new(CacheService::default());
//! let engine = SearchEngine::with_caches(EngineConfig::default(), caches).unwrap();
//!
//! assert!(engine.matches(Some("С-20 Клапан"), "c20"));
//! assert!(!engine.matches(Some("Описание С-200"), "С-20"));
//! assert!(engine.score(Some("С-20"), "с-20") > engine.score(Some("С-200"), "с-20"));
//! ```

// Import logging macros
#[macro_use]
extern crate tracing;

pub mod cache;
pub mod canonical;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod normalize;
pub mod variants;

// Re-export main types
pub use cache::{CacheService, CacheSnapshot, CacheStats};
pub use canonical::canonicalize;
pub use config::EngineConfig;
pub use engine::{RankedMatch, RankedRecord, SearchEngine};
pub use error::{ConfigError, ConfigResult};
pub use matcher::{Explanation, MatchKind};
pub use normalize::normalize;
pub use variants::{generate_variants, VariantMode, VariantSet};
