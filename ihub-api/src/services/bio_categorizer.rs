//! Bio Categorizer Service
//!
//! Rule-based categorization of influencer bios and profile descriptions.
//! Scans the text for whole-word keyword hits against a fixed taxonomy and
//! returns matching categories ordered by match count.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Category taxonomy: simple keyword mapping.
///
/// Declaration order is significant: it is the tie-break for categories
/// with equal match counts.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Fitness",
        &["gym", "workout", "protein", "fitness", "yoga", "running", "lift"],
    ),
    (
        "Tech",
        &[
            "code",
            "coding",
            "software",
            "gadget",
            "crypto",
            "blockchain",
            "ai",
            "developer",
        ],
    ),
    (
        "Beauty",
        &["makeup", "skincare", "fashion", "style", "lipstick", "cosmetics"],
    ),
    (
        "Food",
        &["recipe", "cooking", "delicious", "foodie", "restaurant", "eat"],
    ),
    (
        "Travel",
        &["travel", "vacation", "trip", "hotel", "explore", "adventure"],
    ),
];

struct CategoryMatcher {
    name: &'static str,
    keywords: Vec<Regex>,
}

/// Compiled once per process; read-only afterwards, so shared across
/// concurrent requests without synchronization.
static MATCHERS: Lazy<Vec<CategoryMatcher>> = Lazy::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(name, keywords)| CategoryMatcher {
            name,
            keywords: keywords
                .iter()
                .filter_map(|keyword| compile_word_pattern(keyword))
                .collect(),
        })
        .collect()
});

/// Whole-word, case-insensitive pattern for a single keyword.
///
/// Word boundaries keep 'cat' from matching inside 'concatenate'.
fn compile_word_pattern(word: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Analyze a text string (bio/description) and assign categories based on
/// keyword usage.
///
/// Each configured keyword contributes at most 1 to its category's score
/// regardless of how often it occurs. Returns categories with at least one
/// hit, sorted by match count descending; equal counts keep taxonomy
/// declaration order.
pub fn categorize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut scores: Vec<(&'static str, usize)> = Vec::new();
    for matcher in MATCHERS.iter() {
        let hits = matcher
            .keywords
            .iter()
            .filter(|pattern| pattern.is_match(text))
            .count();
        if hits > 0 {
            scores.push((matcher.name, hits));
        }
    }

    // Stable sort: ties keep declaration order
    scores.sort_by_key(|&(_, hits)| std::cmp::Reverse(hits));

    scores
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect()
}
