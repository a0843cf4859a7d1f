//! Text helpers shared by the extractor, normalizer and logging.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\u{3000}]+").unwrap());

/// Collapse whitespace runs into a single space and trim both ends.
///
/// Listing markup is heavily indented, so text gathered from nested nodes
/// arrives with newlines and tabs between fragments. Ideographic spaces
/// (U+3000) are treated as whitespace as well.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("\n  Hello\n\t World  "), "Hello World");
/// ```
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// char boundary) with an ellipsis and the dropped byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
