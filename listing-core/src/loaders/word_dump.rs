//! Page-wise word dumps, the JSON shape produced by PDF word extraction
//! tools (pdfplumber's `extract_words` and friends):
//!
//! ```json
//! { "pages": [ { "text": "...", "words": [ { "text": "Cosy", "x0": 56.7, "top": 72.1 } ] } ] }
//! ```
//!
//! Unknown keys are ignored, so richer dumps (bottom, x1, fontname) load too.

use super::loader::{has_extension, DocumentLoader};
use crate::error::{ListingError, Result};
use crate::types::{DocumentMetadata, ListingDocument, WordToken};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WordDump {
    #[serde(default)]
    pages: Vec<DumpPage>,
}

#[derive(Debug, Deserialize)]
struct DumpPage {
    /// Explicit 1-indexed page number; position in `pages` otherwise
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    words: Vec<DumpWord>,
}

#[derive(Debug, Deserialize)]
struct DumpWord {
    text: String,
    x0: f32,
    top: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WordDumpLoader;

impl WordDumpLoader {
    fn page_text(page: &DumpPage) -> String {
        match &page.text {
            Some(text) => text.clone(),
            // No extracted text: fall back to the words in dump order
            None => page
                .words
                .iter()
                .map(|w| w.text.trim())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl DocumentLoader for WordDumpLoader {
    fn load(&self, bytes: &[u8]) -> Result<ListingDocument> {
        let dump: WordDump = serde_json::from_slice(bytes).map_err(|e| ListingError::Load {
            loader: self.name().to_string(),
            message: format!("invalid word dump: {e}"),
        })?;

        let mut page_texts = Vec::with_capacity(dump.pages.len());
        let mut tokens = Vec::new();

        for (index, page) in dump.pages.iter().enumerate() {
            let page_number = page.page_number.unwrap_or(index as u32 + 1);
            page_texts.push(Self::page_text(page));
            tokens.extend(
                page.words
                    .iter()
                    .filter(|w| !w.text.trim().is_empty())
                    .map(|w| WordToken::new(w.text.trim(), w.x0, w.top, page_number)),
            );
        }

        debug!(pages = dump.pages.len(), tokens = tokens.len(), "word dump loaded");

        Ok(ListingDocument {
            text: ListingDocument::join_pages(&page_texts),
            tokens,
            metadata: DocumentMetadata {
                page_count: dump.pages.len() as u32,
                loader: self.name().to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        "WordDumpLoader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["json"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_become_text_and_tokens() {
        let json = r#"{
            "pages": [
                { "text": "Harbour loft", "words": [
                    { "text": "Harbour", "x0": 40.0, "top": 50.0, "x1": 90.0 },
                    { "text": "loft", "x0": 95.0, "top": 50.2 }
                ]},
                { "text": "", "words": [] },
                { "text": "Guests: 2", "words": [ { "text": "Guests:", "x0": 40.0, "top": 80.0 } ] }
            ]
        }"#;
        let doc = WordDumpLoader.load(json.as_bytes()).unwrap();
        assert_eq!(doc.text, "Harbour loft\nGuests: 2");
        assert_eq!(doc.tokens.len(), 3);
        assert_eq!(doc.tokens[2].page_number, 3);
        assert_eq!(doc.metadata.page_count, 3);
    }

    #[test]
    fn missing_text_falls_back_to_words() {
        let json = r#"{ "pages": [ { "words": [ { "text": "Cosy", "x0": 1, "top": 2 }, { "text": "cabin", "x0": 3, "top": 2 } ] } ] }"#;
        let doc = WordDumpLoader.load(json.as_bytes()).unwrap();
        assert_eq!(doc.text, "Cosy cabin");
    }

    #[test]
    fn malformed_dump_is_load_error() {
        let err = WordDumpLoader.load(b"{ \"pages\": [ { \"words\": [ { \"text\": 3 } ] } ] }").unwrap_err();
        assert!(matches!(err, ListingError::Load { .. }));
    }

    #[test]
    fn empty_dump_is_empty_document() {
        let doc = WordDumpLoader.load(b"{}").unwrap();
        assert!(doc.text.is_empty());
        assert!(doc.tokens.is_empty());
    }
}
