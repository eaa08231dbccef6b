//! Match classes
//!
//! Platform-specific implementations:
//! - `simd`: substring scan via memchr
//! - otherwise: a char-stepping `starts_with` scan

use serde::{Deserialize, Serialize};

/// Base score of an exact match
pub const EXACT_SCORE: u32 = 1000;
/// Base score of a prefix match, before the length bonus
pub const PREFIX_BASE: u32 = 500;
/// Per-character bonus of a prefix match
pub const PREFIX_PER_CHAR: u32 = 10;
/// Base score of a bounded-substring match, before the length bonus
pub const SUBSTRING_BASE: u32 = 100;
/// Per-character bonus of a bounded-substring match
pub const SUBSTRING_PER_CHAR: u32 = 5;
/// Shortest variant (in chars) allowed to match inside a cell
pub const MIN_SUBSTRING_CHARS: usize = 2;

/// Which class produced a match, from most to least specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
    BoundedSubstring,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
            MatchKind::BoundedSubstring => "bounded_substring",
        }
    }
}

/// Match result from a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyMatch {
    pub kind: MatchKind,
    pub score: u32,
}

#[inline]
fn char_len(s: &str) -> u32 {
    u32::try_from(s.chars().count()).unwrap_or(u32::MAX)
}

/// Try exact match (score: 1000)
#[inline]
pub fn exact_match(variant: &str, cell: &str) -> Option<StrategyMatch> {
    (variant == cell).then_some(StrategyMatch {
        kind: MatchKind::Exact,
        score: EXACT_SCORE,
    })
}

/// Try prefix match (score: 500 + 10 per char)
#[inline]
pub fn prefix_match(variant: &str, cell: &str) -> Option<StrategyMatch> {
    cell.starts_with(variant).then(|| StrategyMatch {
        kind: MatchKind::Prefix,
        score: PREFIX_BASE.saturating_add(PREFIX_PER_CHAR.saturating_mul(char_len(variant))),
    })
}

/// Try bounded-substring match (score: 100 + 5 per char)
///
/// Matches when `variant` occurs in `cell` with no alphanumeric character
/// directly before or after it. Every occurrence is considered, so "с-20" is
/// found in "с-200 и с-20" through its second occurrence.
#[inline]
pub fn bounded_substring_match(variant: &str, cell: &str) -> Option<StrategyMatch> {
    if variant.chars().nth(MIN_SUBSTRING_CHARS - 1).is_none() {
        return None;
    }

    occurrences(variant, cell)
        .any(|pos| is_token_bounded(cell, pos, pos + variant.len()))
        .then(|| StrategyMatch {
            kind: MatchKind::BoundedSubstring,
            score: SUBSTRING_BASE
                .saturating_add(SUBSTRING_PER_CHAR.saturating_mul(char_len(variant))),
        })
}

/// Byte offsets of every (possibly overlapping) occurrence of `needle`.
#[cfg(feature = "simd")]
fn occurrences<'a>(needle: &'a str, haystack: &'a str) -> impl Iterator<Item = usize> + 'a {
    use memchr::memmem;
    let finder = memmem::Finder::new(needle.as_bytes());
    let bytes = haystack.as_bytes();
    let mut from = 0;
    std::iter::from_fn(move || {
        let pos = from + finder.find(bytes.get(from..)?)?;
        from = pos + 1;
        Some(pos)
    })
}

#[cfg(not(feature = "simd"))]
fn occurrences<'a>(needle: &'a str, haystack: &'a str) -> impl Iterator<Item = usize> + 'a {
    // match_indices skips overlaps, so step one char at a time instead
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .filter(move |&i| haystack[i..].starts_with(needle))
}

/// True when `cell[start..end]` is not glued to a letter or digit.
#[inline]
fn is_token_bounded(cell: &str, start: usize, end: usize) -> bool {
    let before = cell[..start].chars().next_back();
    let after = cell[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Best class for one variant against one cell: exact, then prefix, then
/// bounded substring.
pub fn best_match(variant: &str, cell: &str) -> Option<StrategyMatch> {
    if let Some(m) = exact_match(variant, cell) {
        return Some(m);
    }
    if let Some(m) = prefix_match(variant, cell) {
        return Some(m);
    }
    bounded_substring_match(variant, cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(exact_match("с-20", "с-20").map(|m| m.score), Some(1000));
        assert!(exact_match("с-20", "с-200").is_none());
    }

    #[test]
    fn test_prefix_match_scores_by_char_length() {
        let m = prefix_match("с-20", "с-200").unwrap();
        assert_eq!(m.kind, MatchKind::Prefix);
        // 4 chars, not 6 bytes
        assert_eq!(m.score, 540);
    }

    #[test]
    fn test_bounded_substring_respects_boundaries() {
        assert!(bounded_substring_match("20", "с-20 задвижка").is_some());
        assert!(bounded_substring_match("20", "с-200").is_none());
        assert!(bounded_substring_match("20а", "задвижка20а").is_none());
        assert!(bounded_substring_match("20а", "задвижка 20а").is_some());
    }

    #[test]
    fn test_bounded_substring_checks_every_occurrence() {
        let m = bounded_substring_match("с-20", "с-200 и с-20").unwrap();
        assert_eq!(m.score, 120);
    }

    #[test]
    fn test_single_char_never_matches_as_substring() {
        assert!(bounded_substring_match("с", "клапан с 20").is_none());
        assert!(bounded_substring_match("", "клапан").is_none());
    }

    #[test]
    fn test_best_match_priority() {
        assert_eq!(best_match("с-20", "с-20").unwrap().kind, MatchKind::Exact);
        assert_eq!(best_match("с-20", "с-20 клапан").unwrap().kind, MatchKind::Prefix);
        assert_eq!(
            best_match("с-20", "клапан с-20").unwrap().kind,
            MatchKind::BoundedSubstring
        );
        assert!(best_match("с-20", "клапан с-201").is_none());
    }
}
