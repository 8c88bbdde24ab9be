// Listing Extract Core Library
//
// Turns rental listing documents (flat text plus positioned words) into a
// fixed-schema listing record. Each field is filled by a ranked chain of
// extraction strategies; the first strategy that decides wins.

pub mod config;
pub mod error;
pub mod layout;
pub mod loaders;
pub mod locators;
pub mod matching;
pub mod processor;
pub mod serialization;
pub mod strategies;
pub mod types;
pub mod vocabulary;

// Re-export main types and functions for easy use
pub use config::{ExtractionConfig, LabelConfig, LayoutConfig, PipelineConfig, StrategyConfig};
pub use error::{ListingError, Result};
pub use loaders::{
    loader_for_path, DocumentLoader, LoaderImpl, PlainTextLoader, WordDumpLoader, XhtmlLoader,
};
pub use processor::{ListingProcessor, PipelineStages, StepProfiler};
pub use strategies::{ListingExtractor, StrategyKind};
pub use types::*;
pub use vocabulary::Vocabularies;
