//! Plain text listings. A form feed separates pages, as emitted by
//! `pdftotext` and similar tools.

use super::loader::{decode_utf8, has_extension, DocumentLoader};
use crate::error::Result;
use crate::types::{DocumentMetadata, ListingDocument};
use std::path::Path;
use tracing::debug;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLoader;

impl DocumentLoader for PlainTextLoader {
    fn load(&self, bytes: &[u8]) -> Result<ListingDocument> {
        let content = decode_utf8(self.name(), bytes)?;
        let pages: Vec<&str> = content.split(PAGE_BREAK).collect();
        let text = ListingDocument::join_pages(&pages);

        debug!(pages = pages.len(), chars = text.len(), "plain text loaded");

        Ok(ListingDocument {
            text,
            tokens: Vec::new(),
            metadata: DocumentMetadata {
                page_count: pages.len() as u32,
                loader: self.name().to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        "PlainTextLoader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "text"])
    }
}
