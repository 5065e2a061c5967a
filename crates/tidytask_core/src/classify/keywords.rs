//! Keyword extraction for category scoring.
//!
//! # Responsibility
//! - Split free text into lowercase word tokens.
//! - Drop function words and very short tokens.
//!
//! # Invariants
//! - Output keeps left-to-right order and repeated tokens.
//! - Every returned token is lowercase and longer than two characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of letters, digits and underscores. Combining marks split words.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid word regex"));

/// Common English function words ignored during extraction.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "shall", "should", "may", "might", "must", "can", "could",
];

const MIN_KEYWORD_CHARS: usize = 3;

/// Returns whether `token` is in the stop-word set. Expects lowercase input.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Extracts classification keywords from `text`.
///
/// Duplicates are kept; scoring counts raw repetition.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|word| word.as_str())
        .filter(|word| !is_stop_word(word) && word.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}
