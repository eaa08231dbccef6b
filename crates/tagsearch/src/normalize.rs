//! Query and cell-value normalization
//!
//! The same transformation serves both sides of a comparison:
//!
//! 1. lowercase
//! 2. canonicalize confusables (see [`crate::canonical`])
//! 3. replace every run of whitespace, punctuation, symbols or control
//!    characters with one space, except `-` and `/` which carry meaning in tags
//! 4. collapse and trim
//!
//! The output contains only letters, digits, spaces, `-` and `/`.

use std::borrow::Cow;

use crate::canonical::{canonical_char, collapse_whitespace};

/// Normalize a string for comparison. Idempotent; blank input yields `""`.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(canonical_char)
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();
    collapse_whitespace(&cleaned)
}

/// Characters that survive normalization.
#[inline]
pub fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '/'
}

/// Bring raw input within limits: truncate to `max_chars` characters and
/// replace null bytes with spaces. Borrows when nothing needs to change.
pub fn sanitize(raw: &str, max_chars: usize) -> Cow<'_, str> {
    let truncated = match raw.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            debug!(
                max_chars = max_chars,
                original_bytes = raw.len(),
                "truncating oversize search input"
            );
            &raw[..byte_idx]
        }
        None => raw,
    };

    if truncated.contains('\0') {
        Cow::Owned(truncated.replace('\0', " "))
    } else {
        Cow::Borrowed(truncated)
    }
}
