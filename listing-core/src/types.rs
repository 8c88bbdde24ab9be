use crate::strategies::StrategyKind;
use serde::{Deserialize, Serialize};

// ===== LOADER BOUNDARY TYPES =====
// Produced by a DocumentLoader, consumed by the extraction engine.

/// A single rendered word with its position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    /// Left edge of the word in page units
    pub x: f32,
    /// Top edge of the word in page units (grows downwards)
    pub y: f32,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl WordToken {
    pub fn new(text: &str, x: f32, y: f32, page_number: u32) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            page_number,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub page_count: u32,
    /// Name of the loader that produced this document
    pub loader: String,
}

/// Everything the engine needs from a source document: the flat page text
/// (pages joined with a line break, empty pages omitted) and the word tokens
/// in document order. Either part may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDocument {
    pub text: String,
    pub tokens: Vec<WordToken>,
    pub metadata: DocumentMetadata,
}

impl ListingDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn new(text: String, tokens: Vec<WordToken>) -> Self {
        Self {
            text,
            tokens,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Join page texts the way every loader does: skip pages without text,
    /// separate the rest with a single line break.
    pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
        pages
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ===== RECORD SCHEMA =====

/// The fixed schema of a listing record, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListingField {
    Category,
    Title,
    Description,
    NumberOfGuests,
    MinimumStay,
    Amenities,
    Features,
    Kitchen,
    Parking,
    HouseRules,
    CancellationPolicy,
    SafetyAndProperty,
    PropertyType,
    Location,
    ExternalLinks,
    PricePerNight,
}

/// Shape of the value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One vocabulary entry or empty
    SingleChoice,
    /// Set of vocabulary entries
    MultiChoice,
    FreeText,
    Integer,
    Links,
}

impl ListingField {
    pub const ALL: [ListingField; 16] = [
        ListingField::Category,
        ListingField::Title,
        ListingField::Description,
        ListingField::NumberOfGuests,
        ListingField::MinimumStay,
        ListingField::Amenities,
        ListingField::Features,
        ListingField::Kitchen,
        ListingField::Parking,
        ListingField::HouseRules,
        ListingField::CancellationPolicy,
        ListingField::SafetyAndProperty,
        ListingField::PropertyType,
        ListingField::Location,
        ListingField::ExternalLinks,
        ListingField::PricePerNight,
    ];

    /// Element name used by the record serializer
    pub fn element_name(self) -> &'static str {
        match self {
            ListingField::Category => "Category",
            ListingField::Title => "Title",
            ListingField::Description => "Description",
            ListingField::NumberOfGuests => "NumberOfGuests",
            ListingField::MinimumStay => "MinimumStay",
            ListingField::Amenities => "Amenities",
            ListingField::Features => "Features",
            ListingField::Kitchen => "Kitchen",
            ListingField::Parking => "Parking",
            ListingField::HouseRules => "HouseRules",
            ListingField::CancellationPolicy => "CancellationPolicy",
            ListingField::SafetyAndProperty => "SafetyAndProperty",
            ListingField::PropertyType => "PropertyType",
            ListingField::Location => "Location",
            ListingField::ExternalLinks => "ExternalLinks",
            ListingField::PricePerNight => "PricePerNight",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ListingField::Category
            | ListingField::Kitchen
            | ListingField::Parking
            | ListingField::PropertyType
            | ListingField::Location => FieldKind::SingleChoice,
            ListingField::Amenities | ListingField::Features | ListingField::SafetyAndProperty => {
                FieldKind::MultiChoice
            }
            ListingField::Title
            | ListingField::Description
            | ListingField::HouseRules
            | ListingField::CancellationPolicy => FieldKind::FreeText,
            ListingField::NumberOfGuests
            | ListingField::MinimumStay
            | ListingField::PricePerNight => FieldKind::Integer,
            ListingField::ExternalLinks => FieldKind::Links,
        }
    }
}

impl std::fmt::Display for ListingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_name())
    }
}

/// A value decided by one strategy for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Choices(Vec<String>),
    Links(Vec<String>),
}

/// The canonical output: one per document.
///
/// Absence is uniform across the schema: empty string, empty list or `None`
/// for integers. Choice fields only ever hold verbatim vocabulary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingRecord {
    pub category: String,
    pub title: String,
    pub description: String,
    pub number_of_guests: Option<u64>,
    pub minimum_stay: Option<u64>,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
    pub kitchen: String,
    pub parking: String,
    pub house_rules: String,
    pub cancellation_policy: String,
    pub safety_and_property: Vec<String>,
    pub property_type: String,
    pub location: String,
    pub external_links: Vec<String>,
    pub price_per_night: Option<u64>,
}

impl ListingRecord {
    /// Store a decided value. Field/value shape agreement is guaranteed by
    /// config validation; a mismatched pair leaves the field empty.
    pub(crate) fn apply(&mut self, field: ListingField, value: FieldValue) {
        match field {
            ListingField::Category => self.category = text_of(value),
            ListingField::Title => self.title = text_of(value),
            ListingField::Description => self.description = text_of(value),
            ListingField::NumberOfGuests => self.number_of_guests = integer_of(value),
            ListingField::MinimumStay => self.minimum_stay = integer_of(value),
            ListingField::Amenities => self.amenities = list_of(value),
            ListingField::Features => self.features = list_of(value),
            ListingField::Kitchen => self.kitchen = text_of(value),
            ListingField::Parking => self.parking = text_of(value),
            ListingField::HouseRules => self.house_rules = text_of(value),
            ListingField::CancellationPolicy => self.cancellation_policy = text_of(value),
            ListingField::SafetyAndProperty => self.safety_and_property = list_of(value),
            ListingField::PropertyType => self.property_type = text_of(value),
            ListingField::Location => self.location = text_of(value),
            ListingField::ExternalLinks => self.external_links = list_of(value),
            ListingField::PricePerNight => self.price_per_night = integer_of(value),
        }
    }

    /// Rendered element body for a field: sets joined with ", ", links with
    /// newlines, absent integers as an empty string.
    pub fn display_value(&self, field: ListingField) -> String {
        let integer = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_default();
        match field {
            ListingField::Category => self.category.clone(),
            ListingField::Title => self.title.clone(),
            ListingField::Description => self.description.clone(),
            ListingField::NumberOfGuests => integer(self.number_of_guests),
            ListingField::MinimumStay => integer(self.minimum_stay),
            ListingField::Amenities => self.amenities.join(", "),
            ListingField::Features => self.features.join(", "),
            ListingField::Kitchen => self.kitchen.clone(),
            ListingField::Parking => self.parking.clone(),
            ListingField::HouseRules => self.house_rules.clone(),
            ListingField::CancellationPolicy => self.cancellation_policy.clone(),
            ListingField::SafetyAndProperty => self.safety_and_property.join(", "),
            ListingField::PropertyType => self.property_type.clone(),
            ListingField::Location => self.location.clone(),
            ListingField::ExternalLinks => self.external_links.join("\n"),
            ListingField::PricePerNight => integer(self.price_per_night),
        }
    }

    pub fn is_field_empty(&self, field: ListingField) -> bool {
        self.display_value(field).is_empty()
    }

    pub fn filled_field_count(&self) -> usize {
        ListingField::ALL
            .iter()
            .filter(|f| !self.is_field_empty(**f))
            .count()
    }
}

fn text_of(value: FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text,
        _ => String::new(),
    }
}

fn integer_of(value: FieldValue) -> Option<u64> {
    match value {
        FieldValue::Integer(n) => Some(n),
        _ => None,
    }
}

fn list_of(value: FieldValue) -> Vec<String> {
    match value {
        FieldValue::Choices(values) | FieldValue::Links(values) => values,
        _ => Vec::new(),
    }
}

// ===== ENGINE OUTPUT =====

/// Which strategy decided a field, or `None` when every strategy in the
/// field's chain passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProvenance {
    pub field: ListingField,
    pub strategy: Option<StrategyKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub record: ListingRecord,
    /// One entry per field, in schema order
    pub provenance: Vec<FieldProvenance>,
}

impl Extraction {
    pub fn strategy_for(&self, field: ListingField) -> Option<StrategyKind> {
        self.provenance
            .iter()
            .find(|p| p.field == field)
            .and_then(|p| p.strategy)
    }
}
