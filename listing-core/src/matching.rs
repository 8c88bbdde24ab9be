//! Matching primitives
//!
//! Pure, total functions over text. A missing match is an ordinary result
//! (`None` or an empty collection), never an error.

use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only; `\d` would also accept other Unicode digit classes
static INTEGER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// First vocabulary entry, in table order, whose lowercase form occurs in
/// the lowercased text.
pub fn first_match<'a, S: AsRef<str>>(text: &str, vocabulary: &'a [S]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .map(|entry| entry.as_ref())
        .find(|entry| haystack.contains(&entry.to_lowercase()))
}

/// Every vocabulary entry passing the same test as [`first_match`], in
/// table order.
pub fn all_matches<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> Vec<String> {
    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .map(|entry| entry.as_ref())
        .filter(|entry| haystack.contains(&entry.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Whether any keyword occurs in the text, ignoring case
pub fn contains_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.as_ref().to_lowercase()))
}

/// First maximal run of decimal digits. A run too long for `u64` counts as
/// absent.
pub fn first_integer(text: &str) -> Option<u64> {
    INTEGER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// First integer that follows `keyword` on the same line, e.g. the `95` in
/// "Price from only 95 kr". Keyword lookup ignores case.
pub fn integer_after_keyword(text: &str, keyword: &str) -> Option<u64> {
    if keyword.trim().is_empty() {
        return None;
    }
    let pattern = format!(r"(?i){}[^\r\n]*?([0-9]+)", regex::escape(keyword));
    let re = Regex::new(&pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Every `http://` or `https://` run of non-whitespace, in document order.
/// Duplicates are kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARKING: &[&str] = &[
        "Free parking on premises",
        "Free parking nearby",
        "No parking available",
    ];

    #[test]
    fn first_match_ignores_case() {
        assert_eq!(
            first_match("there is FREE PARKING NEARBY", PARKING),
            Some("Free parking nearby")
        );
    }

    #[test]
    fn first_match_prefers_table_order() {
        let text = "Free parking nearby, and also free parking on premises";
        assert_eq!(first_match(text, PARKING), Some("Free parking on premises"));
    }

    #[test]
    fn first_match_returns_canonical_entry() {
        let found = first_match("free parking nearby", PARKING).unwrap();
        assert!(PARKING.contains(&found));
    }

    #[test]
    fn first_match_none_on_empty_text() {
        assert_eq!(first_match("", PARKING), None);
    }

    #[test]
    fn all_matches_keeps_table_order() {
        let amenities = ["Pets Allowed", "TV", "Iron"];
        let found = all_matches("iron, tv and an iron board", &amenities);
        assert_eq!(found, vec!["TV".to_string(), "Iron".to_string()]);
    }

    #[test]
    fn all_matches_is_subset_without_duplicates() {
        let amenities = ["Dryer", "Hair Dryer"];
        let found = all_matches("Hair dryer in the bathroom, hair dryer in the hall", &amenities);
        assert_eq!(found, vec!["Dryer".to_string(), "Hair Dryer".to_string()]);
    }

    #[test]
    fn first_integer_takes_first_digit_run() {
        assert_eq!(first_integer("Sleeps 4 guests in 2 rooms"), Some(4));
        assert_eq!(first_integer("1,250 kr"), Some(1));
        assert_eq!(first_integer("-3.5"), Some(3));
        assert_eq!(first_integer("no digits here"), None);
        assert_eq!(first_integer(""), None);
    }

    #[test]
    fn first_integer_overflow_is_absent() {
        assert_eq!(first_integer("99999999999999999999999 nights"), None);
    }

    #[test]
    fn integer_after_keyword_stays_on_line() {
        assert_eq!(integer_after_keyword("Price from 95 kr", "price"), Some(95));
        assert_eq!(integer_after_keyword("3 rooms. PRICE is 80", "price"), Some(80));
        assert_eq!(integer_after_keyword("Price on request\n4 guests", "price"), None);
        assert_eq!(integer_after_keyword("Price 10", ""), None);
    }

    #[test]
    fn urls_in_document_order_with_duplicates() {
        let text = "See https://a.example/x and http://b.example\nagain https://a.example/x";
        assert_eq!(
            extract_urls(text),
            vec![
                "https://a.example/x".to_string(),
                "http://b.example".to_string(),
                "https://a.example/x".to_string(),
            ]
        );
    }

    #[test]
    fn urls_require_scheme() {
        let urls = extract_urls("www.example.com ftp://files.example https://ok.example");
        assert_eq!(urls, vec!["https://ok.example".to_string()]);
        assert!(urls.iter().all(|u| u.starts_with("http://") || u.starts_with("https://")));
    }

    #[test]
    fn contains_any_ignores_case() {
        assert!(contains_any("WHAT THIS PLACE OFFERS", &["this place offers"]));
        assert!(!contains_any("A cosy cabin", &["amenities"]));
    }
}
