//! Rule-Based Sentiment Scorer Service
//!
//! Lexicon intersection over the set of unique words in the input. No
//! model, no weights: the score is the normalized balance of positive and
//! negative lexicon hits.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["love", "great", "amazing", "best", "good", "excellent"]
        .into_iter()
        .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["hate", "worst", "bad", "terrible", "awful", "scam"]
        .into_iter()
        .collect()
});

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("hard-coded pattern is valid"));

/// Score the sentiment of `text` in [-1.0, 1.0].
///
/// Tokens are the unique `\w+` runs of the lowercased text; each lexicon
/// word counts once no matter how often it repeats. Zero lexicon hits is a
/// neutral 0.0, not an error.
pub fn score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let tokens: HashSet<&str> = WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let pos_count = tokens
        .iter()
        .filter(|token| POSITIVE_WORDS.contains(*token))
        .count() as f64;
    let neg_count = tokens
        .iter()
        .filter(|token| NEGATIVE_WORDS.contains(*token))
        .count() as f64;

    let total = pos_count + neg_count;
    if total == 0.0 {
        return 0.0;
    }

    (pos_count - neg_count) / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let value = score("This product is amazing and I love it!");
        assert!(value > 0.3, "expected positive score, got {}", value);
    }

    #[test]
    fn test_negative_text() {
        let value = score("This is the worst scam ever. Hate it.");
        assert!(value < -0.3, "expected negative score, got {}", value);
    }

    #[test]
    fn test_neutral_text_is_exactly_zero() {
        assert_eq!(score("The sky is blue today."), 0.0);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_repeated_words_count_once() {
        // One unique positive vs one unique negative, regardless of repeats
        assert_eq!(score("love love love love hate"), 0.0);
    }

    #[test]
    fn test_mixed_leans_positive() {
        // Two positive words, one negative: (2 - 1) / 3
        let value = score("Great quality, bad packaging, but amazing overall.");
        assert!((value - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(score("love great amazing best good excellent"), 1.0);
        assert_eq!(score("hate worst bad terrible awful scam"), -1.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert!(score("ABSOLUTELY LOVE IT") > 0.0);
    }

    #[test]
    fn test_idempotent() {
        let text = "Good product, would buy again.";
        assert_eq!(score(text), score(text));
    }
}
