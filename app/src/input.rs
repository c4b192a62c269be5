//! Handle list parsing for bulk runs.

use std::collections::HashSet;

/// Shortest entry kept from a handle list.
const MIN_ENTRY_LEN: usize = 2;

/// Parse a handle list, one handle per line.
///
/// Lines are trimmed; blank lines and `#` comments are skipped, leading `@`
/// characters are stripped, entries shorter than two characters are dropped,
/// and case-insensitive duplicates are removed keeping the first occurrence.
/// Entries are otherwise passed through untouched so the checker can report
/// malformed ones individually.
#[must_use]
pub fn parse_handle_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_start_matches('@').trim())
        .filter(|entry| entry.chars().count() >= MIN_ENTRY_LEN)
        .filter(|entry| seen.insert(entry.to_lowercase()))
        .map(ToString::to_string)
        .collect()
}

/// Parse a handle list read from a file. Bytes that are not valid UTF-8 are
/// dropped rather than replaced.
#[must_use]
pub fn parse_handle_bytes(bytes: &[u8]) -> Vec<String> {
    let text: String = String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect();
    parse_handle_list(&text)
}

/// Extract the handle from free-form single-check input: leading `@` is
/// dropped and only the first word is kept.
#[must_use]
pub fn single_handle(text: &str) -> Option<&str> {
    text.trim()
        .trim_start_matches('@')
        .split_whitespace()
        .next()
}
