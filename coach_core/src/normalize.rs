//! Name normalization for catalog comparison.

/// Normalize a free-text name for matching
///
/// Lower-cases, drops everything outside `[a-z0-9 ]` and trims. Inner
/// runs of spaces are left alone; the scorers split on whitespace.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}
