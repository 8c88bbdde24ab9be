use super::{choice, document, labeled, positional, StrategyKind};
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::layout::{LayoutReconstructor, ReconstructedLine, TitleZone};
use crate::locators::{check_label, SectionLocator};
use crate::types::*;
use crate::vocabulary::Vocabularies;
use std::cell::OnceCell;
use tracing::{debug, info};

/// Resolved, enabled strategy chain for one field
#[derive(Debug, Clone)]
struct FieldPlan {
    field: ListingField,
    chain: Vec<StrategyKind>,
    labels: Vec<String>,
    keywords: Vec<String>,
}

/// Layout results computed at most once per document, and only when a
/// positional strategy actually asks for them.
struct DocumentView<'a> {
    document: &'a ListingDocument,
    layout: &'a LayoutReconstructor,
    lines: OnceCell<Vec<ReconstructedLine>>,
    title_zone: OnceCell<TitleZone>,
}

impl<'a> DocumentView<'a> {
    fn new(document: &'a ListingDocument, layout: &'a LayoutReconstructor) -> Self {
        Self {
            document,
            layout,
            lines: OnceCell::new(),
            title_zone: OnceCell::new(),
        }
    }

    fn text(&self) -> &str {
        &self.document.text
    }

    fn lines(&self) -> &[ReconstructedLine] {
        self.lines.get_or_init(|| self.layout.lines(&self.document.tokens))
    }

    fn title_zone(&self) -> &TitleZone {
        self.title_zone.get_or_init(|| self.layout.title_zone(self.lines()))
    }
}

/// The extraction engine: document in, canonical record out.
///
/// Construction validates the whole configuration and compiles the
/// stop-label and title-price patterns. Per-label patterns are built on each
/// lookup. Extraction cannot fail and holds no state between calls; an
/// extractor can be shared across threads.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    vocabularies: Vocabularies,
    locator: SectionLocator,
    layout: LayoutReconstructor,
    plans: Vec<FieldPlan>,
}

impl ListingExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let stop_labels = config.labels.stop_labels();
        for label in &stop_labels {
            check_label(label)?;
        }

        let locator = SectionLocator::new(&stop_labels)?;
        let layout = LayoutReconstructor::new(&config.layout)?;

        let plans = ListingField::ALL
            .iter()
            .map(|field| FieldPlan {
                field: *field,
                chain: config
                    .pipeline
                    .chain_for(*field)
                    .into_iter()
                    .filter(|entry| entry.enabled)
                    .map(|entry| entry.strategy)
                    .collect(),
                labels: non_blank(config.labels.labels_for(*field)),
                keywords: non_blank(config.labels.integer_keywords_for(*field)),
            })
            .collect();

        Ok(Self {
            vocabularies: config.vocabularies,
            locator,
            layout,
            plans,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ExtractionConfig::default())
    }

    /// Run every field's chain over the document
    pub fn extract(&self, document: &ListingDocument) -> Extraction {
        let view = DocumentView::new(document, &self.layout);
        let mut record = ListingRecord::default();
        let mut provenance = Vec::with_capacity(self.plans.len());

        for plan in &self.plans {
            let decided = plan.chain.iter().find_map(|kind| {
                self.apply_strategy(*kind, plan, &view).map(|value| (*kind, value))
            });

            let strategy = match decided {
                Some((kind, value)) => {
                    record.apply(plan.field, value);
                    debug!(
                        field = %plan.field,
                        strategy = %kind,
                        empty = record.is_field_empty(plan.field),
                        "field decided"
                    );
                    Some(kind)
                }
                None => {
                    debug!(field = %plan.field, "no strategy decided");
                    None
                }
            };

            provenance.push(FieldProvenance {
                field: plan.field,
                strategy,
            });
        }

        info!(
            filled = record.filled_field_count(),
            total = ListingField::ALL.len(),
            tokens = document.tokens.len(),
            "listing extracted"
        );

        Extraction { record, provenance }
    }

    pub fn extract_record(&self, document: &ListingDocument) -> ListingRecord {
        self.extract(document).record
    }

    /// Reconstructed lines for a document, as the positional strategies see them
    pub fn reconstruct_lines(&self, document: &ListingDocument) -> Vec<ReconstructedLine> {
        self.layout.lines(&document.tokens)
    }

    fn apply_strategy(
        &self,
        kind: StrategyKind,
        plan: &FieldPlan,
        view: &DocumentView<'_>,
    ) -> Option<FieldValue> {
        let text = view.text();
        match kind {
            StrategyKind::LabeledField => labeled::labeled_field(text, &plan.labels),
            StrategyKind::LabeledSection => {
                labeled::labeled_section(&self.locator, text, &plan.labels)
            }
            StrategyKind::SectionVocabulary => {
                let table = self.vocabularies.table_for(plan.field)?;
                choice::section_vocabulary(
                    &self.locator,
                    text,
                    &plan.labels,
                    table,
                    plan.field.kind(),
                )
            }
            StrategyKind::DocumentVocabulary => {
                let table = self.vocabularies.table_for(plan.field)?;
                choice::document_vocabulary(text, table, plan.field.kind())
            }
            StrategyKind::LabeledInteger => labeled::labeled_integer(text, &plan.labels),
            StrategyKind::KeywordInteger => labeled::keyword_integer(text, &plan.keywords),
            StrategyKind::DocumentInteger => document::document_integer(text),
            StrategyKind::DocumentUrls => document::document_urls(text),
            StrategyKind::TitleZone => positional::title_zone(view.title_zone()),
            StrategyKind::TitleZonePrice => positional::title_zone_price(view.title_zone()),
            StrategyKind::BoundedDescription => {
                positional::bounded_description(self.layout.bounded_description(view.lines()))
            }
        }
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;

    fn extractor() -> ListingExtractor {
        ListingExtractor::with_defaults().unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn extractor_is_shareable_across_threads() {
        assert_send_sync::<ListingExtractor>();
    }

    #[test]
    fn empty_document_yields_empty_record() {
        let extraction = extractor().extract(&ListingDocument::default());
        assert_eq!(extraction.record, ListingRecord::default());
        assert_eq!(extraction.record.filled_field_count(), 0);
        assert_eq!(extraction.provenance.len(), ListingField::ALL.len());
    }

    #[test]
    fn labeled_sections_scope_vocabulary_matches() {
        let doc = ListingDocument::from_text(
            "Amenities: TV, Pool\nFeatures: Internet\nKitchen: Full kitchen",
        );
        let extraction = extractor().extract(&doc);
        assert_eq!(extraction.record.amenities, vec!["TV".to_string()]);
        assert_eq!(extraction.record.features, vec!["Internet".to_string()]);
        assert_eq!(extraction.record.kitchen, "Full kitchen");
        assert_eq!(
            extraction.strategy_for(ListingField::Amenities),
            Some(StrategyKind::SectionVocabulary)
        );
    }

    #[test]
    fn bare_phrase_falls_back_to_document_match() {
        let doc = ListingDocument::from_text("Free parking nearby");
        let extraction = extractor().extract(&doc);
        assert_eq!(extraction.record.parking, "Free parking nearby");
        assert_eq!(
            extraction.strategy_for(ListingField::Parking),
            Some(StrategyKind::DocumentVocabulary)
        );
    }

    #[test]
    fn labeled_price_beats_document_scan() {
        let doc = ListingDocument::from_text("Sleeps 4\nPrice per night: 125 kr");
        let extraction = extractor().extract(&doc);
        assert_eq!(extraction.record.price_per_night, Some(125));
        assert_eq!(
            extraction.strategy_for(ListingField::PricePerNight),
            Some(StrategyKind::LabeledInteger)
        );
    }

    #[test]
    fn unlabeled_price_comes_from_document_scan() {
        let doc = ListingDocument::from_text("A bright room, 150 kr per night, close to the sea.");
        let extraction = extractor().extract(&doc);
        assert_eq!(extraction.record.price_per_night, Some(150));
        assert_eq!(
            extraction.strategy_for(ListingField::PricePerNight),
            Some(StrategyKind::DocumentInteger)
        );
    }

    #[test]
    fn title_zone_fills_title_and_price_from_tokens() {
        let tokens = vec![
            WordToken::new("Lake", 40.0, 30.0, 1),
            WordToken::new("house", 90.0, 31.0, 1),
            WordToken::new("850", 300.0, 30.5, 1),
            WordToken::new("kr", 340.0, 30.5, 1),
            WordToken::new("A", 40.0, 300.0, 1),
            WordToken::new("wooden", 60.0, 300.0, 1),
            WordToken::new("house", 120.0, 300.0, 1),
            WordToken::new("right", 170.0, 300.0, 1),
            WordToken::new("by", 210.0, 300.0, 1),
            WordToken::new("the", 230.0, 300.0, 1),
            WordToken::new("water", 260.0, 300.0, 1),
            WordToken::new("Amenities", 40.0, 400.0, 1),
        ];
        let doc = ListingDocument::new(
            "Lake house 850 kr\nA wooden house right by the water\nAmenities".to_string(),
            tokens,
        );
        let extraction = extractor().extract(&doc);
        assert_eq!(extraction.record.title, "Lake house");
        assert_eq!(extraction.record.price_per_night, Some(850));
        assert_eq!(extraction.record.description, "A wooden house right by the water");
        assert_eq!(
            extraction.strategy_for(ListingField::Title),
            Some(StrategyKind::TitleZone)
        );
        assert_eq!(
            extraction.strategy_for(ListingField::PricePerNight),
            Some(StrategyKind::TitleZonePrice)
        );
        assert_eq!(
            extraction.strategy_for(ListingField::Description),
            Some(StrategyKind::BoundedDescription)
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = ListingDocument::from_text(
            "Title: Harbour loft\nGuests: 3\nHouse rules: No parties.\nLinks: https://a.example",
        );
        let extractor = extractor();
        assert_eq!(extractor.extract(&doc), extractor.extract(&doc));
    }

    #[test]
    fn reordered_chain_changes_winner() {
        let mut config = ExtractionConfig::default();
        config.pipeline.fields.insert(
            ListingField::PricePerNight,
            vec![
                StrategyConfig::new(StrategyKind::DocumentInteger),
                StrategyConfig::new(StrategyKind::LabeledInteger),
            ],
        );
        let extractor = ListingExtractor::new(config).unwrap();
        let doc = ListingDocument::from_text("Sleeps 4\nPrice per night: 125 kr");
        let extraction = extractor.extract(&doc);
        assert_eq!(extraction.record.price_per_night, Some(4));
        assert_eq!(
            extraction.strategy_for(ListingField::PricePerNight),
            Some(StrategyKind::DocumentInteger)
        );
    }

    #[test]
    fn disabled_strategy_is_skipped() {
        let mut config = ExtractionConfig::default();
        config.pipeline.fields.insert(
            ListingField::Parking,
            vec![
                StrategyConfig::new(StrategyKind::SectionVocabulary),
                StrategyConfig {
                    strategy: StrategyKind::DocumentVocabulary,
                    enabled: false,
                },
            ],
        );
        let extractor = ListingExtractor::new(config).unwrap();
        let extraction = extractor.extract(&ListingDocument::from_text("Free parking nearby"));
        assert_eq!(extraction.record.parking, "");
        assert_eq!(extraction.strategy_for(ListingField::Parking), None);
    }

    #[test]
    fn substitute_vocabulary_is_honoured() {
        let mut config = ExtractionConfig::default();
        config.vocabularies.parkings = vec!["Garage".to_string()];
        let extractor = ListingExtractor::new(config).unwrap();
        let document = ListingDocument::from_text("Parking: garage under the house");
        let record = extractor.extract_record(&document);
        assert_eq!(record.parking, "Garage");
    }

    #[test]
    fn invalid_configuration_fails_at_construction() {
        let mut config = ExtractionConfig::default();
        config.layout.bucket_width = 0.0;
        assert!(ListingExtractor::new(config).is_err());
    }
}
