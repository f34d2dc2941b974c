//! Multi-line text helpers for ingredients and steps.
//!
//! These are pure text transforms. Renumbering is applied after
//! translation, independently of which lines translated and which fell
//! back.

use regex::Regex;
use std::sync::OnceLock;

static ORDINAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `text` must be translated line by line.
pub fn is_multiline(text: &str) -> bool {
    text.contains('\n')
}

/// Trimmed non-blank lines, in source order.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Remove a leading ordinal such as `"3. "`, `"3 "` or `"12."`.
pub fn strip_ordinal(line: &str) -> &str {
    let regex = ORDINAL_REGEX.get_or_init(|| Regex::new(r"^\d+\.?\s*").unwrap());
    match regex.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// Prefix each line with a fresh `"{n}. "` ordinal starting at 1.
pub fn renumber<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line.as_ref()))
        .collect()
}
