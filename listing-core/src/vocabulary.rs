//! Controlled vocabularies for the categorical listing fields.
//!
//! Table order is significant: first-match lookups resolve overlapping
//! phrases in favour of the earlier entry.

use crate::error::{ListingError, Result};
use crate::types::ListingField;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CATEGORIES: &[&str] = &["Entire Place", "Private Room", "Hotel Room", "Shared Room"];

pub const AMENITIES: &[&str] = &[
    "Pets Allowed",
    "TV",
    "Air Conditioning",
    "Dedicated workspace",
    "Washing Machine",
    "Dryer",
    "Hair Dryer",
    "Iron",
];

pub const FEATURES: &[&str] = &[
    "Internet",
    "Pool",
    "Hot tub",
    "EV charger",
    "Cot",
    "King size bed",
    "Gym",
    "BBQ grill",
    "Smoking allowed",
    "Wheelchair access",
];

pub const KITCHENS: &[&str] = &[
    "Full kitchen",
    "Shared",
    "Kitchenette",
    "Outdoor",
    "No kitchen available",
];

pub const PARKINGS: &[&str] = &[
    "Free parking on premises",
    "Free parking nearby",
    "Paid parking on premises",
    "Paid parking nearby",
    "No parking available",
];

pub const SAFETY: &[&str] = &[
    "Smoke alarm",
    "Carbon monoxide alarm",
    "Exterior security cameras on property",
];

pub const PROPERTY_TYPES: &[&str] = &[
    "Apartment",
    "Bed & Breakfast",
    "Cabin",
    "Condo",
    "Guest House",
    "Hostel",
    "Hotel",
    "House",
    "House Boat",
    "Resort",
    "Other",
];

pub const LOCATIONS: &[&str] = &[
    "Beachfront",
    "City Center",
    "Countryside",
    "Outside of City Center",
    "Other",
];

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| e.to_string()).collect()
}

/// One vocabulary table per categorical field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabularies {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_amenities")]
    pub amenities: Vec<String>,
    #[serde(default = "default_features")]
    pub features: Vec<String>,
    #[serde(default = "default_kitchens")]
    pub kitchens: Vec<String>,
    #[serde(default = "default_parkings")]
    pub parkings: Vec<String>,
    #[serde(default = "default_safety")]
    pub safety: Vec<String>,
    #[serde(default = "default_property_types")]
    pub property_types: Vec<String>,
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

fn default_categories() -> Vec<String> {
    owned(CATEGORIES)
}
fn default_amenities() -> Vec<String> {
    owned(AMENITIES)
}
fn default_features() -> Vec<String> {
    owned(FEATURES)
}
fn default_kitchens() -> Vec<String> {
    owned(KITCHENS)
}
fn default_parkings() -> Vec<String> {
    owned(PARKINGS)
}
fn default_safety() -> Vec<String> {
    owned(SAFETY)
}
fn default_property_types() -> Vec<String> {
    owned(PROPERTY_TYPES)
}
fn default_locations() -> Vec<String> {
    owned(LOCATIONS)
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            amenities: default_amenities(),
            features: default_features(),
            kitchens: default_kitchens(),
            parkings: default_parkings(),
            safety: default_safety(),
            property_types: default_property_types(),
            locations: default_locations(),
        }
    }
}

impl Vocabularies {
    /// The table backing a categorical field; `None` for fields that are
    /// not vocabulary-constrained.
    pub fn table_for(&self, field: ListingField) -> Option<&[String]> {
        let table = match field {
            ListingField::Category => &self.categories,
            ListingField::Amenities => &self.amenities,
            ListingField::Features => &self.features,
            ListingField::Kitchen => &self.kitchens,
            ListingField::Parking => &self.parkings,
            ListingField::SafetyAndProperty => &self.safety,
            ListingField::PropertyType => &self.property_types,
            ListingField::Location => &self.locations,
            _ => return None,
        };
        Some(table.as_slice())
    }

    fn named_tables(&self) -> [(&'static str, &[String]); 8] {
        [
            ("categories", self.categories.as_slice()),
            ("amenities", self.amenities.as_slice()),
            ("features", self.features.as_slice()),
            ("kitchens", self.kitchens.as_slice()),
            ("parkings", self.parkings.as_slice()),
            ("safety", self.safety.as_slice()),
            ("property_types", self.property_types.as_slice()),
            ("locations", self.locations.as_slice()),
        ]
    }

    /// Tables must be non-empty, free of blank entries and free of entries
    /// that collide case-insensitively (matching ignores case, so such a
    /// pair could never be told apart).
    pub fn validate(&self) -> Result<()> {
        for (name, table) in self.named_tables() {
            let invalid = |reason: String| ListingError::InvalidVocabulary {
                table: name.to_string(),
                reason,
            };

            if table.is_empty() {
                return Err(invalid("table has no entries".to_string()));
            }

            let mut seen = HashSet::new();
            for entry in table {
                if entry.trim().is_empty() {
                    return Err(invalid("blank entry".to_string()));
                }
                if entry.trim() != entry.as_str() {
                    return Err(invalid(format!("entry '{entry}' has surrounding whitespace")));
                }
                if !seen.insert(entry.to_lowercase()) {
                    return Err(invalid(format!("duplicate entry '{entry}'")));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_valid() {
        assert!(Vocabularies::default().validate().is_ok());
    }

    #[test]
    fn parking_priority_follows_table_order() {
        let vocab = Vocabularies::default();
        let parking = vocab.table_for(ListingField::Parking).unwrap();
        let on_premises = parking.iter().position(|p| p == "Free parking on premises");
        let nearby = parking.iter().position(|p| p == "Free parking nearby");
        assert!(on_premises < nearby);
    }

    #[test]
    fn free_text_fields_have_no_table() {
        let vocab = Vocabularies::default();
        assert!(vocab.table_for(ListingField::Title).is_none());
        assert!(vocab.table_for(ListingField::PricePerNight).is_none());
    }

    #[test]
    fn case_insensitive_duplicates_are_rejected() {
        let vocab = Vocabularies {
            amenities: vec!["TV".to_string(), "tv".to_string()],
            ..Vocabularies::default()
        };
        match vocab.validate() {
            Err(ListingError::InvalidVocabulary { table, .. }) => assert_eq!(table, "amenities"),
            other => panic!("expected InvalidVocabulary, got {other:?}"),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        let vocab = Vocabularies {
            locations: Vec::new(),
            ..Vocabularies::default()
        };
        assert!(vocab.validate().is_err());
    }
}
