//! Matcher
//!
//! Compares a normalized cell value against the variant set of a query.
//!
//! # Match classes (in order of specificity)
//!
//! 1. Exact match (score: 1000)
//! 2. Prefix match (score: 500 + 10 × variant length)
//! 3. Bounded-substring match (score: 100 + 5 × variant length), variants of
//!    two or more characters only
//!
//! A query's score against a cell is the best score over all of its variants.
//! Exact always outranks prefix for variants under 50 characters; longer
//! prefixes can tie or overtake it, so every variant is scored.
//!
//! # Example
//!
//! ```rust
//! use tagsearch::matcher;
//! use tagsearch::normalize::normalize;
//! use tagsearch::variants::{generate_variants, VariantMode};
//!
//! let variants = generate_variants(&normalize("с20"), VariantMode::Strict);
//! let cell = normalize("С-20 Клапан");
//! assert!(matcher::matches(&cell, &variants));
//! ```

mod strategies;

use serde::Serialize;

use crate::variants::VariantSet;

pub use strategies::{
    best_match, bounded_substring_match, exact_match, prefix_match, MatchKind, StrategyMatch,
    EXACT_SCORE, MIN_SUBSTRING_CHARS, PREFIX_BASE, PREFIX_PER_CHAR, SUBSTRING_BASE,
    SUBSTRING_PER_CHAR,
};

/// Why a cell matched: the winning variant and its class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub variant: String,
    pub kind: MatchKind,
    pub score: u32,
}

/// True if any variant matches the normalized cell as exact, prefix or
/// bounded substring. Stops at the first hit.
pub fn matches(cell: &str, variants: &VariantSet) -> bool {
    if cell.is_empty() {
        return false;
    }
    variants.iter().any(|v| {
        exact_match(v, cell).is_some()
            || prefix_match(v, cell).is_some()
            || bounded_substring_match(v, cell).is_some()
    })
}

/// Best score over all variants; 0 when nothing matches.
pub fn score(cell: &str, variants: &VariantSet) -> u32 {
    explain(cell, variants).map_or(0, |e| e.score)
}

/// The highest-scoring variant match, earliest variant on ties.
pub fn explain(cell: &str, variants: &VariantSet) -> Option<Explanation> {
    if cell.is_empty() {
        return None;
    }

    let mut best: Option<(&str, StrategyMatch)> = None;
    for variant in variants.iter() {
        let Some(m) = best_match(variant, cell) else {
            continue;
        };
        // no early exit on exact: a long prefix variant can outscore it
        if best.map_or(true, |(_, b)| m.score > b.score) {
            best = Some((variant, m));
        }
    }

    best.map(|(variant, m)| Explanation {
        variant: variant.to_string(),
        kind: m.kind,
        score: m.score,
    })
}
