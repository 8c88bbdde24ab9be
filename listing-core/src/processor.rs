use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::layout::ReconstructedLine;
use crate::loaders::{loader_for_path, DocumentLoader};
use crate::strategies::ListingExtractor;
use crate::types::*;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Captured intermediate outputs from each pipeline stage
/// Used for diagnostics: lets you inspect each boundary on its own
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineStages {
    pub loader: String,
    pub text: String,
    pub tokens: Vec<WordToken>,
    pub lines: Vec<ReconstructedLine>,
    pub extraction: Extraction,
}

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        self.timings.push((step_name.to_string(), elapsed));
        println!("⏱️  {}: {:.3}ms", step_name, elapsed.as_secs_f64() * 1000.0);

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        println!("\n📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            println!(
                "   {:.<35} {:.3}ms ({:.1}%)",
                step,
                duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        println!("   {:.<35} {:.3}ms", "Total", total.as_secs_f64() * 1000.0);
    }
}

/// File in, extraction out: loader selection plus the extraction engine
pub struct ListingProcessor {
    extractor: ListingExtractor,
}

impl ListingProcessor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        Ok(Self {
            extractor: ListingExtractor::new(config)?,
        })
    }

    /// Load a document with the loader matching its extension
    pub fn load(&self, input_path: &Path) -> Result<ListingDocument> {
        let loader = loader_for_path(input_path)?;
        let mut document = loader.load_file(input_path)?;
        document.metadata.loader = loader.name().to_string();
        Ok(document)
    }

    pub fn process_file(&self, input_path: &Path) -> Result<Extraction> {
        self.process_file_with_profiling(input_path, false)
    }

    /// Process a file, printing step timings when profiling is enabled
    pub fn process_file_with_profiling(
        &self,
        input_path: &Path,
        enable_profiling: bool,
    ) -> Result<Extraction> {
        let mut profiler = StepProfiler::new(enable_profiling);
        let start_time = Instant::now();

        let document = profiler.time_step("Load document", || self.load(input_path))?;
        let extraction = profiler.time_step("Extract fields", || self.extractor.extract(&document));

        info!(
            input = %input_path.display(),
            loader = %document.metadata.loader,
            filled = extraction.record.filled_field_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "document processed"
        );
        profiler.print_summary();

        Ok(extraction)
    }

    /// Process a file and capture every intermediate stage output
    pub fn process_file_capture_stages(&self, input_path: &Path) -> Result<PipelineStages> {
        let document = self.load(input_path)?;
        println!(
            "📋 Stage 1: {} loaded {} chars, {} tokens",
            document.metadata.loader,
            document.text.len(),
            document.tokens.len()
        );

        let lines = self.extractor.reconstruct_lines(&document);
        println!("📋 Stage 2: {} lines reconstructed", lines.len());

        let extraction = self.extractor.extract(&document);
        println!(
            "📋 Stage 3: {}/{} fields filled",
            extraction.record.filled_field_count(),
            ListingField::ALL.len()
        );

        Ok(PipelineStages {
            loader: document.metadata.loader,
            text: document.text,
            tokens: document.tokens,
            lines,
            extraction,
        })
    }
}
