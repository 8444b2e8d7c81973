/// Normalize an answer for comparison: surrounding whitespace removed, lowercased.
#[must_use]
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Exact comparison after normalization. No fuzzy matching.
#[must_use]
pub fn answers_match(expected: &str, reply: &str) -> bool {
    normalize_answer(expected) == normalize_answer(reply)
}
