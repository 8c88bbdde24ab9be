//! Label-driven strategies. Labels are tried in configured order; the first
//! label that yields content decides.

use crate::locators::{extract_field, SectionLocator};
use crate::matching::{first_integer, integer_after_keyword};
use crate::types::FieldValue;

/// First non-empty same-line value among `labels`
pub fn labeled_field(text: &str, labels: &[String]) -> Option<FieldValue> {
    labels
        .iter()
        .map(|label| extract_field(text, label))
        .find(|value| !value.is_empty())
        .map(FieldValue::Text)
}

/// First non-empty section among `labels`
pub fn labeled_section(
    locator: &SectionLocator,
    text: &str,
    labels: &[String],
) -> Option<FieldValue> {
    first_section(locator, text, labels).map(FieldValue::Text)
}

pub(crate) fn first_section(
    locator: &SectionLocator,
    text: &str,
    labels: &[String],
) -> Option<String> {
    labels
        .iter()
        .map(|label| locator.section(text, label))
        .find(|section| !section.is_empty())
}

/// First integer inside a labeled field value ("Guests: up to 6" -> 6)
pub fn labeled_integer(text: &str, labels: &[String]) -> Option<FieldValue> {
    labels
        .iter()
        .find_map(|label| first_integer(&extract_field(text, label)))
        .map(FieldValue::Integer)
}

/// First integer following any keyword on the same line
pub fn keyword_integer(text: &str, keywords: &[String]) -> Option<FieldValue> {
    keywords
        .iter()
        .find_map(|keyword| integer_after_keyword(text, keyword))
        .map(FieldValue::Integer)
}
