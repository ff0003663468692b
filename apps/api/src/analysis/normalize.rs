/// Trims the string and collapses every internal whitespace run into a single space.
/// Case is left untouched; folding happens in the deduplicator.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized, lowercased form used as the comparison key for keywords.
pub fn fold_key(s: &str) -> String {
    normalize(s).to_lowercase()
}
