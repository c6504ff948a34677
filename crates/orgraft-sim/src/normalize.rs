//! The comparison fold applied to names before scoring.

/// Normalize a name for similarity comparison.
///
/// Lowercases, treats every non-alphanumeric character as a separator,
/// collapses separator runs to a single space, and trims the ends. Two
/// names that differ only in case, punctuation, or spacing normalize to
/// the same string and score 100 against each other.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_space = true;
        }
    }
    out
}
