//! Variant generation
//!
//! Expands one normalized query into the handful of spellings a stored value
//! might use for the same identifier. Tags in the field follow a loose grammar
//! of a single letter, an optional dash and a run of digits ("с-20", "с20",
//! "с 20"), so the expansions are built around that shape.
//!
//! Two modes:
//! - [`VariantMode::Strict`]: the normalized form, its compact form and the
//!   whole-string identifier expansions. Small and cheap.
//! - [`VariantMode::Extended`]: strict output plus mid-string identifier
//!   rewrites, trailing-letter forms and Latin/Cyrillic swapped twins.
//!
//! Variants are appended in generation order and deduplicated once at the end,
//! keeping the first occurrence.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::canonical::{collapse_whitespace, to_cyrillic, to_latin};

/// Variant generation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantMode {
    /// Whole-string identifier shapes only
    #[default]
    Strict,
    /// Higher recall, larger variant sets
    Extended,
}

impl VariantMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantMode::Strict => "strict",
            VariantMode::Extended => "extended",
        }
    }
}

impl fmt::Display for VariantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(VariantMode::Strict),
            "extended" | "legacy" => Ok(VariantMode::Extended),
            other => Err(format!("unknown variant mode: {}", other)),
        }
    }
}

/// Ordered set of unique, non-blank variants of one normalized string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantSet {
    variants: Vec<String>,
}

impl VariantSet {
    /// Build from candidates in generation order, dropping blanks and
    /// repeated entries (first occurrence wins).
    fn from_candidates(candidates: Vec<String>) -> Self {
        let mut seen: HashSet<String, RandomState> =
            HashSet::with_capacity_and_hasher(candidates.len(), RandomState::new());
        let variants = candidates
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .filter(|v| seen.insert(v.clone()))
            .collect();
        Self { variants }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.variants
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

/// Generate the variant set of an already-normalized string.
///
/// Blank input yields an empty set; otherwise the set starts with the input.
pub fn generate_variants(normalized: &str, mode: VariantMode) -> VariantSet {
    if normalized.trim().is_empty() {
        return VariantSet::default();
    }

    let candidates = match mode {
        VariantMode::Strict => strict_candidates(normalized),
        VariantMode::Extended => extended_candidates(normalized),
    };
    VariantSet::from_candidates(candidates)
}

fn strict_candidates(normalized: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(8);
    out.push(normalized.to_string());
    out.push(normalized.to_lowercase());

    let compact = compact(normalized);
    out.push(compact.to_lowercase());
    out.push(compact);

    if let Some(tag) = Identifier::parse_whole(normalized) {
        out.extend(tag.spellings());
    }
    out
}

fn extended_candidates(normalized: &str) -> Vec<String> {
    let mut out = strict_candidates(normalized);

    out.push(normalized.replace(' ', ""));

    let lowered: Vec<String> = out.iter().map(|v| v.to_lowercase()).collect();
    out.extend(lowered);

    let stripped = strip_to_word_chars(normalized);
    out.push(stripped.replace(' ', ""));
    out.push(stripped);

    out.extend(inline_identifier_rewrites(normalized));
    out.extend(trailing_letter_forms(normalized));

    let swapped: Vec<String> = out
        .iter()
        .flat_map(|v| [to_latin(v), to_cyrillic(v)])
        .collect();
    out.extend(swapped);
    out
}

/// Drop spaces and punctuation other than the dash.
fn compact(s: &str) -> String {
    s.chars()
        .filter(|&c| c.is_alphanumeric() || c == '-')
        .collect()
}

/// Keep letters, digits, spaces and dashes; collapse what is left.
fn strip_to_word_chars(s: &str) -> String {
    let kept: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&kept)
}

/// A single-letter identifier: `с-20`, `с20`, `с 20`, or the bare `с-`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Identifier {
    letter: char,
    digits: String,
}

impl Identifier {
    /// Match the whole string against the identifier shapes.
    fn parse_whole(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        let (&letter, rest) = chars.split_first()?;
        if !letter.is_alphabetic() {
            return None;
        }

        // `letter-`
        if rest == ['-'] {
            return Some(Self {
                letter,
                digits: String::new(),
            });
        }

        // `letter-digits`, `letter digits`, `letterdigits`
        let digits = match rest.first() {
            Some('-') | Some(' ') => &rest[1..],
            _ => rest,
        };

        if digits.is_empty() || !digits.iter().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            letter,
            digits: digits.iter().collect(),
        })
    }

    fn is_bare(&self) -> bool {
        self.digits.is_empty()
    }

    /// The spellings this identifier is stored under, dashed form first.
    fn spellings(&self) -> Vec<String> {
        if self.is_bare() {
            return vec![format!("{}-", self.letter), self.letter.to_string()];
        }
        vec![
            format!("{}-{}", self.letter, self.digits),
            format!("{}{}", self.letter, self.digits),
            format!("{} {}", self.letter, self.digits),
        ]
    }
}

/// Identifier occurrences anywhere in the string, as char ranges.
///
/// An occurrence is a letter at a token start, an optional space or dash, and
/// a maximal run of digits.
fn find_identifiers(chars: &[char]) -> Vec<(usize, usize, Identifier)> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let letter = chars[i];
        let at_token_start = i == 0 || !chars[i - 1].is_alphanumeric();
        if !letter.is_alphabetic() || !at_token_start {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        if j < chars.len() && (chars[j] == ' ' || chars[j] == '-') {
            j += 1;
        }
        let digits_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == digits_start {
            i += 1;
            continue;
        }

        found.push((
            i,
            j,
            Identifier {
                letter,
                digits: chars[digits_start..j].iter().collect(),
            },
        ));
        i = j;
    }
    found
}

/// Rewrite every mid-string identifier in each of its spellings.
fn inline_identifier_rewrites(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    for (start, end, tag) in find_identifiers(&chars) {
        let head: String = chars[..start].iter().collect();
        let tail: String = chars[end..].iter().collect();
        for spelling in tag.spellings() {
            out.push(format!("{}{}{}", head, spelling, tail));
        }
    }
    out
}

/// `...20а`, `...20 а`, `...20-а` for strings ending in digits and one letter.
fn trailing_letter_forms(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let Some((&letter, rest)) = chars.split_last() else {
        return Vec::new();
    };
    if !letter.is_alphabetic() {
        return Vec::new();
    }

    let body = match rest.last() {
        Some(' ') | Some('-') => &rest[..rest.len() - 1],
        _ => rest,
    };
    if !body.last().is_some_and(|c| c.is_ascii_digit()) {
        return Vec::new();
    }
    // the letter must stand alone, not end a word like "20ка"
    if rest.last().is_some_and(|c| c.is_alphabetic()) {
        return Vec::new();
    }

    let body: String = body.iter().collect();
    vec![
        format!("{}{}", body, letter),
        format!("{} {}", body, letter),
        format!("{}-{}", body, letter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(s: &str) -> Vec<String> {
        generate_variants(s, VariantMode::Strict).as_slice().to_vec()
    }

    fn extended(s: &str) -> VariantSet {
        generate_variants(s, VariantMode::Extended)
    }

    #[test]
    fn test_blank_input_yields_empty_set() {
        assert!(generate_variants("", VariantMode::Strict).is_empty());
        assert!(generate_variants("   ", VariantMode::Extended).is_empty());
    }

    #[test]
    fn test_dashed_identifier() {
        assert_eq!(strict("а-0"), vec!["а-0", "а0", "а 0"]);
    }

    #[test]
    fn test_compact_identifier() {
        assert_eq!(strict("с20"), vec!["с20", "с-20", "с 20"]);
    }

    #[test]
    fn test_spaced_identifier() {
        assert_eq!(strict("с 20"), vec!["с 20", "с20", "с-20"]);
    }

    #[test]
    fn test_bare_letter_with_dash() {
        assert_eq!(strict("с-"), vec!["с-", "с"]);
    }

    #[test]
    fn test_non_identifier_gets_compact_form_only() {
        assert_eq!(strict("клапан 1/2"), vec!["клапан 1/2", "клапан12"]);
        assert_eq!(strict("20"), vec!["20"]);
    }

    #[test]
    fn test_multi_letter_prefix_is_not_an_identifier() {
        assert_eq!(strict("кт-20"), vec!["кт-20"]);
    }

    #[test]
    fn test_first_variant_is_the_input() {
        for s in ["с-20", "задвижка", "а в с", "1/2"] {
            let set = generate_variants(s, VariantMode::Strict);
            assert_eq!(set.iter().next(), Some(s));
            let set = extended(s);
            assert_eq!(set.iter().next(), Some(s));
        }
    }

    #[test]
    fn test_extended_is_superset_of_strict() {
        for s in ["с-20", "с 20 клапан", "насос н-3а", "20 а"] {
            let ext = extended(s);
            for v in strict(s) {
                assert!(ext.contains(&v), "{:?} missing {:?}", s, v);
            }
        }
    }

    #[test]
    fn test_extended_rewrites_identifiers_mid_string() {
        let set = extended("клапан с 20 резерв");
        assert!(set.contains("клапан с-20 резерв"));
        assert!(set.contains("клапан с20 резерв"));
    }

    #[test]
    fn test_extended_trailing_letter_forms() {
        let set = extended("20 а");
        assert!(set.contains("20а"));
        assert!(set.contains("20-а"));
    }

    #[test]
    fn test_extended_swaps_alphabets() {
        let set = extended("с-20");
        assert!(set.contains("c-20"), "latin twin expected: {:?}", set);
    }

    #[test]
    fn test_no_duplicates() {
        let set = extended("с-20");
        let unique: HashSet<&str> = set.iter().collect();
        assert_eq!(unique.len(), set.len());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Strict".parse::<VariantMode>(), Ok(VariantMode::Strict));
        assert_eq!("extended".parse::<VariantMode>(), Ok(VariantMode::Extended));
        assert!("fuzzy".parse::<VariantMode>().is_err());
    }
}
