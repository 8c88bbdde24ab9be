use crate::error::{ListingError, Result};
use crate::strategies::StrategyKind;
use crate::types::ListingField;
use crate::vocabulary::Vocabularies;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Everything the extraction engine is parameterized by. Every section has
/// defaults, so a YAML file only needs to name what it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Controlled vocabularies for the categorical fields
    #[serde(default)]
    pub vocabularies: Vocabularies,
    /// Field labels, extra section headings and integer keywords
    #[serde(default)]
    pub labels: LabelConfig,
    /// Layout heuristics thresholds
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Per-field strategy chains
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

// ===== LABELS =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Labels tried in order for each field. Fields missing from the map
    /// keep their default labels.
    #[serde(default = "default_field_labels")]
    pub fields: BTreeMap<ListingField, Vec<String>>,
    /// Headings that end a section without being a field label themselves
    #[serde(default = "default_extra_stop_labels")]
    pub extra_stop_labels: Vec<String>,
    /// Keywords for the same-line integer scan, per integer field
    #[serde(default = "default_integer_keywords")]
    pub integer_keywords: BTreeMap<ListingField, Vec<String>>,
}

fn default_labels_for(field: ListingField) -> Vec<String> {
    match field {
        ListingField::Category => strings(&["category"]),
        ListingField::Title => strings(&["listing title", "title"]),
        ListingField::Description => strings(&["description"]),
        ListingField::NumberOfGuests => strings(&["number of guests", "guests", "guest"]),
        ListingField::MinimumStay => strings(&["minimum stay"]),
        ListingField::Amenities => strings(&["amenities"]),
        ListingField::Features => strings(&["features"]),
        ListingField::Kitchen => strings(&["kitchen"]),
        ListingField::Parking => strings(&["parking"]),
        ListingField::HouseRules => strings(&["house rules"]),
        ListingField::CancellationPolicy => strings(&["cancellation policy"]),
        ListingField::SafetyAndProperty => strings(&["safety and property", "safety"]),
        ListingField::PropertyType => strings(&["property type"]),
        ListingField::Location => strings(&["location"]),
        ListingField::ExternalLinks => strings(&["external links", "links"]),
        ListingField::PricePerNight => strings(&["price per night", "price"]),
    }
}

fn default_field_labels() -> BTreeMap<ListingField, Vec<String>> {
    ListingField::ALL
        .iter()
        .map(|field| (*field, default_labels_for(*field)))
        .collect()
}

fn default_extra_stop_labels() -> Vec<String> {
    strings(&[
        "what this place offers",
        "about this space",
        "the space",
        "check-in",
        "checkout",
        "contact",
    ])
}

fn default_integer_keywords_for(field: ListingField) -> Vec<String> {
    match field {
        ListingField::NumberOfGuests => strings(&["guest"]),
        ListingField::MinimumStay => strings(&["minimum stay"]),
        ListingField::PricePerNight => strings(&["price"]),
        _ => Vec::new(),
    }
}

fn default_integer_keywords() -> BTreeMap<ListingField, Vec<String>> {
    [
        ListingField::NumberOfGuests,
        ListingField::MinimumStay,
        ListingField::PricePerNight,
    ]
    .iter()
    .map(|field| (*field, default_integer_keywords_for(*field)))
    .collect()
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            fields: default_field_labels(),
            extra_stop_labels: default_extra_stop_labels(),
            integer_keywords: default_integer_keywords(),
        }
    }
}

impl LabelConfig {
    pub fn labels_for(&self, field: ListingField) -> Vec<String> {
        self.fields
            .get(&field)
            .cloned()
            .unwrap_or_else(|| default_labels_for(field))
    }

    pub fn integer_keywords_for(&self, field: ListingField) -> Vec<String> {
        self.integer_keywords
            .get(&field)
            .cloned()
            .unwrap_or_else(|| default_integer_keywords_for(field))
    }

    /// Every field label plus the extra headings, blank entries dropped
    pub fn stop_labels(&self) -> Vec<String> {
        let mut stops: Vec<String> = ListingField::ALL
            .iter()
            .flat_map(|field| self.labels_for(*field))
            .chain(self.extra_stop_labels.iter().cloned())
            .filter(|label| !label.trim().is_empty())
            .collect();
        stops.sort();
        stops.dedup();
        stops
    }
}

// ===== LAYOUT =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Height of one line bucket in page units (roughly one line-height)
    #[serde(default = "default_bucket_width")]
    pub bucket_width: f32,
    /// Lines on the first page above this `y` form the title zone
    #[serde(default = "default_top_threshold")]
    pub top_threshold: f32,
    /// Shorter lines are skipped by the bounded description
    #[serde(default = "default_min_line_length")]
    pub min_line_length: usize,
    /// A line containing any of these ends the bounded description
    #[serde(default = "default_stop_keywords")]
    pub stop_keywords: Vec<String>,
    /// Currency words recognized after a trailing title price
    #[serde(default = "default_currency_markers")]
    pub currency_markers: Vec<String>,
}

fn default_bucket_width() -> f32 {
    10.0 // points; one line of body text
}

fn default_top_threshold() -> f32 {
    100.0 // points from the top of the first page
}

fn default_min_line_length() -> usize {
    20
}

fn default_stop_keywords() -> Vec<String> {
    strings(&[
        "amenities",
        "features",
        "house rules",
        "kitchen",
        "parking",
        "price",
        "cancellation",
        "safety",
        "location",
        "guests",
        "what this place offers",
    ])
}

fn default_currency_markers() -> Vec<String> {
    strings(&["kr", "dkk", "kroner", "eur", "€", "usd", "$"])
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bucket_width: default_bucket_width(),
            top_threshold: default_top_threshold(),
            min_line_length: default_min_line_length(),
            stop_keywords: default_stop_keywords(),
            currency_markers: default_currency_markers(),
        }
    }
}

// ===== PIPELINE =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub strategy: StrategyKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl StrategyConfig {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Ranked strategies per field. Fields missing from the map keep their
    /// default chain.
    #[serde(default = "default_chains")]
    pub fields: BTreeMap<ListingField, Vec<StrategyConfig>>,
}

fn default_chain_for(field: ListingField) -> Vec<StrategyConfig> {
    use StrategyKind::*;

    let kinds: &[StrategyKind] = match field {
        ListingField::Category
        | ListingField::Kitchen
        | ListingField::Parking
        | ListingField::PropertyType
        | ListingField::Location
        | ListingField::Amenities
        | ListingField::Features
        | ListingField::SafetyAndProperty => &[SectionVocabulary, DocumentVocabulary],
        ListingField::Title => &[LabeledField, TitleZone],
        ListingField::Description => &[LabeledSection, BoundedDescription],
        ListingField::NumberOfGuests | ListingField::MinimumStay => {
            &[LabeledInteger, KeywordInteger, DocumentInteger]
        }
        ListingField::PricePerNight => &[
            LabeledInteger,
            TitleZonePrice,
            KeywordInteger,
            DocumentInteger,
        ],
        ListingField::ExternalLinks => &[DocumentUrls],
        ListingField::HouseRules | ListingField::CancellationPolicy => &[LabeledSection],
    };
    kinds.iter().copied().map(StrategyConfig::new).collect()
}

fn default_chains() -> BTreeMap<ListingField, Vec<StrategyConfig>> {
    ListingField::ALL
        .iter()
        .map(|field| (*field, default_chain_for(*field)))
        .collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fields: default_chains(),
        }
    }
}

impl PipelineConfig {
    pub fn chain_for(&self, field: ListingField) -> Vec<StrategyConfig> {
        self.fields
            .get(&field)
            .cloned()
            .unwrap_or_else(|| default_chain_for(field))
    }
}

// ===== LOADING & VALIDATION =====

impl ExtractionConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ExtractionConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                warn!(path = p, error = %e, "failed to load extraction config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations the engine cannot run: malformed vocabularies,
    /// strategies attached to fields they cannot serve, empty chains, chains
    /// that need labels or keywords but have none, and unusable thresholds.
    pub fn validate(&self) -> Result<()> {
        self.vocabularies.validate()?;

        if !(self.layout.bucket_width.is_finite() && self.layout.bucket_width > 0.0) {
            return Err(ListingError::InvalidConfig(format!(
                "layout.bucket_width must be a positive number, got {}",
                self.layout.bucket_width
            )));
        }
        if !self.layout.top_threshold.is_finite() {
            return Err(ListingError::InvalidConfig(
                "layout.top_threshold must be finite".to_string(),
            ));
        }

        for field in ListingField::ALL {
            let chain = self.pipeline.chain_for(field);
            if chain.is_empty() {
                return Err(ListingError::InvalidConfig(format!(
                    "strategy chain for {field} is empty"
                )));
            }

            for entry in &chain {
                if !entry.strategy.applies_to(field) {
                    return Err(ListingError::InvalidConfig(format!(
                        "strategy {:?} cannot be used for {field}",
                        entry.strategy
                    )));
                }
                if !entry.enabled {
                    continue;
                }
                if entry.strategy.needs_labels() && !has_content(&self.labels.labels_for(field)) {
                    return Err(ListingError::InvalidConfig(format!(
                        "strategy {:?} needs at least one label for {field}",
                        entry.strategy
                    )));
                }
                if entry.strategy == StrategyKind::KeywordInteger
                    && !has_content(&self.labels.integer_keywords_for(field))
                {
                    return Err(ListingError::InvalidConfig(format!(
                        "strategy KeywordInteger needs at least one keyword for {field}"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn has_content(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}
