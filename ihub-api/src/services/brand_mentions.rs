//! Brand Mention Detector Service
//!
//! Scans free text (captions, posts, bios) for whole-word occurrences of
//! caller-supplied brand names.

use regex::RegexBuilder;

/// Scan `text` for each name in `brand_names`.
///
/// Matching is whole-word and case-insensitive. The output contains the
/// caller's original strings (original casing) in input order. Duplicate
/// names in the input are looked up independently and can therefore appear
/// twice in the output; dedup is the caller's decision, not ours.
pub fn detect(text: &str, brand_names: &[String]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for brand in brand_names {
        let pattern = format!(r"\b{}\b", regex::escape(brand));
        let matcher = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(_) => continue,
        };

        if matcher.is_match(text) {
            found.push(brand.clone());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detects_present_brand_only() {
        let mentions = detect("I love Nike and Nike shoes", &names(&["Nike", "Adidas"]));
        assert_eq!(mentions, vec!["Nike".to_string()]);
    }

    #[test]
    fn test_empty_text_returns_empty() {
        assert!(detect("", &names(&["Nike"])).is_empty());
    }

    #[test]
    fn test_empty_brand_list_returns_empty() {
        assert!(detect("I love Nike", &[]).is_empty());
    }

    #[test]
    fn test_case_insensitive_preserves_input_casing() {
        let mentions = detect("loving my new NIKE kicks", &names(&["Nike"]));
        assert_eq!(mentions, vec!["Nike".to_string()]);
    }

    #[test]
    fn test_whole_word_only() {
        // 'Puma' must not match inside 'Pumas'... but it does match the
        // standalone word regardless of punctuation around it.
        assert!(detect("Pumashoes are fake", &names(&["Puma"])).is_empty());
        let mentions = detect("Got new Puma, love them", &names(&["Puma"]));
        assert_eq!(mentions, vec!["Puma".to_string()]);
    }

    #[test]
    fn test_duplicate_input_names_not_deduplicated() {
        let mentions = detect("Nike forever", &names(&["Nike", "Nike"]));
        assert_eq!(mentions, vec!["Nike".to_string(), "Nike".to_string()]);
    }

    #[test]
    fn test_input_order_preserved() {
        let mentions = detect(
            "Adidas and Nike both sent packages",
            &names(&["Nike", "Adidas"]),
        );
        assert_eq!(mentions, vec!["Nike".to_string(), "Adidas".to_string()]);
    }
}
