//! Vocabulary-constrained strategies. Values are always verbatim table
//! entries: one for single-choice fields, a table-ordered subset for
//! multi-choice fields.

use super::labeled::first_section;
use crate::locators::SectionLocator;
use crate::matching::{all_matches, first_match};
use crate::types::{FieldKind, FieldValue};

/// Match `text` against `table` in the shape `kind` asks for
pub fn choose(text: &str, table: &[String], kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::MultiChoice => FieldValue::Choices(all_matches(text, table)),
        _ => FieldValue::Text(first_match(text, table).unwrap_or_default().to_string()),
    }
}

/// Decides as soon as the field's section is located, even when nothing in
/// it matches: a located section is the authoritative scope for the field.
pub fn section_vocabulary(
    locator: &SectionLocator,
    text: &str,
    labels: &[String],
    table: &[String],
    kind: FieldKind,
) -> Option<FieldValue> {
    first_section(locator, text, labels).map(|section| choose(&section, table, kind))
}

/// Whole-document match; always decides
pub fn document_vocabulary(text: &str, table: &[String], kind: FieldKind) -> Option<FieldValue> {
    Some(choose(text, table, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{AMENITIES, PARKINGS};

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn section_scope_keeps_neighbouring_sections_out() {
        let locator = SectionLocator::new(&["amenities", "features", "kitchen"]).unwrap();
        let text = "Amenities: TV, Pool\nFeatures: Internet, Iron";
        let value = section_vocabulary(
            &locator,
            text,
            &owned(&["amenities"]),
            &owned(AMENITIES),
            FieldKind::MultiChoice,
        );
        assert_eq!(value, Some(FieldValue::Choices(owned(&["TV"]))));
    }

    #[test]
    fn missing_section_passes() {
        let locator = SectionLocator::new(&["parking"]).unwrap();
        let value = section_vocabulary(
            &locator,
            "Free parking nearby",
            &owned(&["parking"]),
            &owned(PARKINGS),
            FieldKind::SingleChoice,
        );
        assert_eq!(value, None);
    }

    #[test]
    fn located_section_without_match_decides_empty() {
        let locator = SectionLocator::new(&["parking", "location"]).unwrap();
        let text = "Parking: ask the host\nLocation: Free parking nearby";
        let value = section_vocabulary(
            &locator,
            text,
            &owned(&["parking"]),
            &owned(PARKINGS),
            FieldKind::SingleChoice,
        );
        assert_eq!(value, Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn document_vocabulary_always_decides() {
        assert_eq!(
            document_vocabulary("nothing here", &owned(PARKINGS), FieldKind::SingleChoice),
            Some(FieldValue::Text(String::new()))
        );
        assert_eq!(
            document_vocabulary("Free parking nearby", &owned(PARKINGS), FieldKind::SingleChoice),
            Some(FieldValue::Text("Free parking nearby".to_string()))
        );
    }
}
