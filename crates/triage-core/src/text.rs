//! Canonical symptom text.

/// Normalize a symptom string to its canonical form.
///
/// Lowercases, trims, turns underscores into spaces and collapses runs of
/// whitespace, so `"  Chest_Pain "` and `"chest   pain"` both become
/// `"chest pain"`. Returns an empty string for blank input.
#[must_use]
pub fn normalize_symptom(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
