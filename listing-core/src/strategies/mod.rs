// Strategy chain module
// - engine.rs: ListingExtractor, per-field chain evaluation and provenance
// - labeled.rs: label-driven strategies (fields, sections, integers)
// - choice.rs: vocabulary-constrained strategies
// - positional.rs: strategies over reconstructed layout (title zone, description)
// - document.rs: whole-document scans (integers, links)

pub mod choice;
pub mod document;
pub mod engine;
pub mod labeled;
pub mod positional;

pub use engine::*;

use crate::types::{FieldKind, ListingField};
use serde::{Deserialize, Serialize};

/// One way of deciding a field's value. A strategy either decides (possibly
/// an empty value) or passes to the next entry in the field's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Same-line content after a field label
    LabeledField,
    /// Content after a field label up to the next known label
    LabeledSection,
    /// Vocabulary match inside the field's labeled section
    SectionVocabulary,
    /// Vocabulary match over the whole document
    DocumentVocabulary,
    /// First integer in a labeled field
    LabeledInteger,
    /// First integer following a keyword on the same line
    KeywordInteger,
    /// Price split off the end of the title zone
    TitleZonePrice,
    /// First integer anywhere in the document
    DocumentInteger,
    /// Lines at the top of the first page
    TitleZone,
    /// Body lines up to the first stop heading
    BoundedDescription,
    /// Every link in the document
    DocumentUrls,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::LabeledField => "LabeledField",
            StrategyKind::LabeledSection => "LabeledSection",
            StrategyKind::SectionVocabulary => "SectionVocabulary",
            StrategyKind::DocumentVocabulary => "DocumentVocabulary",
            StrategyKind::LabeledInteger => "LabeledInteger",
            StrategyKind::KeywordInteger => "KeywordInteger",
            StrategyKind::TitleZonePrice => "TitleZonePrice",
            StrategyKind::DocumentInteger => "DocumentInteger",
            StrategyKind::TitleZone => "TitleZone",
            StrategyKind::BoundedDescription => "BoundedDescription",
            StrategyKind::DocumentUrls => "DocumentUrls",
        }
    }

    /// Whether this strategy can produce a value of the field's shape
    pub fn applies_to(self, field: ListingField) -> bool {
        let kind = field.kind();
        match self {
            StrategyKind::LabeledField
            | StrategyKind::LabeledSection
            | StrategyKind::BoundedDescription => kind == FieldKind::FreeText,
            StrategyKind::SectionVocabulary | StrategyKind::DocumentVocabulary => {
                matches!(kind, FieldKind::SingleChoice | FieldKind::MultiChoice)
            }
            StrategyKind::LabeledInteger
            | StrategyKind::KeywordInteger
            | StrategyKind::DocumentInteger => kind == FieldKind::Integer,
            StrategyKind::TitleZone => field == ListingField::Title,
            StrategyKind::TitleZonePrice => field == ListingField::PricePerNight,
            StrategyKind::DocumentUrls => kind == FieldKind::Links,
        }
    }

    /// Strategies that locate content through the field's labels
    pub fn needs_labels(self) -> bool {
        matches!(
            self,
            StrategyKind::LabeledField
                | StrategyKind::LabeledSection
                | StrategyKind::SectionVocabulary
                | StrategyKind::LabeledInteger
        )
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_strategies_only_serve_choice_fields() {
        assert!(StrategyKind::SectionVocabulary.applies_to(ListingField::Amenities));
        assert!(StrategyKind::DocumentVocabulary.applies_to(ListingField::Parking));
        assert!(!StrategyKind::DocumentVocabulary.applies_to(ListingField::Title));
    }

    #[test]
    fn title_zone_strategies_are_field_specific() {
        assert!(StrategyKind::TitleZone.applies_to(ListingField::Title));
        assert!(!StrategyKind::TitleZone.applies_to(ListingField::Description));
        assert!(StrategyKind::TitleZonePrice.applies_to(ListingField::PricePerNight));
        assert!(!StrategyKind::TitleZonePrice.applies_to(ListingField::NumberOfGuests));
    }

    #[test]
    fn strategy_kind_serializes_by_name() {
        let json = serde_json::to_string(&StrategyKind::KeywordInteger).unwrap();
        assert_eq!(json, "\"KeywordInteger\"");
    }
}
