//! Text helpers for log lines and display names
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//!
//! ## Changelog
//! - 1.0.0: Character-safe truncation and first-letter capitalisation

/// Maximum length of an API request log line, ellipsis included
pub const LOG_LINE_LIMIT: usize = 80;

const ELLIPSIS: char = '…';

/// Truncate text to at most `max_chars` characters.
///
/// Text that fits is returned unchanged. Longer text keeps its first
/// `max_chars - 1` characters and ends with a single `…`. Counts characters,
/// never splits a multi-byte character.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
