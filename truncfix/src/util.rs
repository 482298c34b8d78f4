//! String helpers that operate on characters rather than bytes.

use crate::constants::{DECORATION_CHARS, MERGE_MARKER, SEGMENT_MARKER};

/// Remove Gertwol decoration, keeping segment and merge markers.
pub(crate) fn strip_decoration(s: &str) -> String {
    s.chars().filter(|c| !DECORATION_CHARS.contains(c)).collect()
}

/// Remove Gertwol decoration and segment markers.
pub(crate) fn strip_segmentation(s: &str) -> String {
    s.chars()
        .filter(|&c| c != SEGMENT_MARKER && !DECORATION_CHARS.contains(&c))
        .collect()
}

/// Remove all decoration, segment markers, and merge markers.
pub(crate) fn strip_all(s: &str) -> String {
    s.chars()
        .filter(|&c| c != SEGMENT_MARKER && c != MERGE_MARKER && !DECORATION_CHARS.contains(&c))
        .collect()
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s`.
pub(crate) fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `s` without its first `n` characters.
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Character offset of the last occurrence of `needle` in `haystack`,
/// ignoring case.
pub(crate) fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = lowercase_chars(haystack);
    let needle = lowercase_chars(needle);

    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .rev()
        .find(|&start| haystack[start..start + needle.len()] == needle[..])
}

/// Character offset of the last occurrence of `needle` in `haystack`.
pub(crate) fn rfind_chars(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .rfind(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

// Lowercasing per character keeps offsets aligned with the original string.
fn lowercase_chars(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Uppercase the first character, lowercase the remainder.
pub(crate) fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
