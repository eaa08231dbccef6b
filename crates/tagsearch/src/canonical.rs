//! Confusable-character canonicalization
//!
//! Maps characters that render identically across Latin and Cyrillic (and the
//! assorted dash and space glyphs that spreadsheets pick up) onto a single
//! representative, so that "C-20" typed on an English layout compares equal to
//! "С‑20" stored by a Russian one.
//!
//! Uses compile-time perfect hashing (phf) for O(1) character lookup.

use phf::phf_map;

/// Latin look-alikes folded onto their Cyrillic twin during canonicalization.
///
/// Includes the extended set (h, k, m, t, b) which only resembles Cyrillic in
/// upper case, but equipment tags are typically upper case anyway.
static LATIN_TO_CYRILLIC: phf::Map<char, char> = phf_map! {
    'a' => 'а', 'A' => 'А',
    'c' => 'с', 'C' => 'С',
    'e' => 'е', 'E' => 'Е',
    'o' => 'о', 'O' => 'О',
    'p' => 'р', 'P' => 'Р',
    'x' => 'х', 'X' => 'Х',
    'y' => 'у', 'Y' => 'У',
    'h' => 'н', 'H' => 'Н',
    'k' => 'к', 'K' => 'К',
    'm' => 'м', 'M' => 'М',
    't' => 'т', 'T' => 'Т',
    'b' => 'в', 'B' => 'В',
};

/// Basic Latin → Cyrillic map used by the alphabet swap of extended variants.
///
/// Deliberately narrower than [`LATIN_TO_CYRILLIC`] and not the inverse of
/// [`CYRILLIC_TO_LATIN`].
static LATIN_TO_CYRILLIC_BASIC: phf::Map<char, char> = phf_map! {
    'a' => 'а', 'A' => 'А',
    'c' => 'с', 'C' => 'С',
    'e' => 'е', 'E' => 'Е',
    'o' => 'о', 'O' => 'О',
    'p' => 'р', 'P' => 'Р',
    'x' => 'х', 'X' => 'Х',
    'y' => 'у', 'Y' => 'У',
};

/// Cyrillic → Latin map used by the alphabet swap of extended variants.
static CYRILLIC_TO_LATIN: phf::Map<char, char> = phf_map! {
    'а' => 'a', 'А' => 'A',
    'в' => 'b', 'В' => 'B',
    'е' => 'e', 'Е' => 'E',
    'к' => 'k', 'К' => 'K',
    'м' => 'm', 'М' => 'M',
    'н' => 'h', 'Н' => 'H',
    'о' => 'o', 'О' => 'O',
    'р' => 'p', 'Р' => 'P',
    'с' => 'c', 'С' => 'C',
    'т' => 't', 'Т' => 'T',
    'у' => 'y', 'У' => 'Y',
    'х' => 'x', 'Х' => 'X',
};

/// Returns true for hyphen, dash and minus glyphs that should read as `-`.
#[inline]
pub fn is_dash(c: char) -> bool {
    matches!(
        c,
        '-' | '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}'
    )
}

/// Returns true for no-break space variants.
#[inline]
fn is_nbsp(c: char) -> bool {
    matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Canonicalize a single character (case preserved).
#[inline]
pub fn canonical_char(c: char) -> char {
    if is_dash(c) {
        return '-';
    }
    if is_nbsp(c) {
        return ' ';
    }
    match c {
        'ё' => 'е',
        'Ё' => 'Е',
        _ => LATIN_TO_CYRILLIC.get(&c).copied().unwrap_or(c),
    }
}

/// Map every confusable character to its canonical form, then collapse
/// whitespace runs to a single space and trim.
///
/// Total: any input, including the empty string, yields a string.
pub fn canonicalize(s: &str) -> String {
    let mapped: String = s.chars().map(canonical_char).collect();
    collapse_whitespace(&mapped)
}

/// Collapse whitespace runs to a single ASCII space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Replace Cyrillic confusables with their Latin look-alike.
pub fn to_latin(s: &str) -> String {
    s.chars()
        .map(|c| CYRILLIC_TO_LATIN.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Replace basic Latin confusables with their Cyrillic look-alike.
pub fn to_cyrillic(s: &str) -> String {
    s.chars()
        .map(|c| LATIN_TO_CYRILLIC_BASIC.get(&c).copied().unwrap_or(c))
        .collect()
}
