//! Document Loaders
//!
//! Loaders turn a source file into the engine's input: flat page text plus
//! positioned word tokens.
//!
//! ```text
//! Document (.txt, .json word dump, .xhtml)
//!     ↓
//! [Format-specific DocumentLoader]
//!     ↓
//! ListingDocument (text + tokens)
//!     ↓
//! [ListingExtractor]
//!     ↓
//! ListingRecord
//! ```
//!
//! ## Available Loaders
//!
//! - `PlainTextLoader` - text files, form feed separates pages, no tokens
//! - `WordDumpLoader` - page-wise word dumps from PDF word extraction tools
//! - `XhtmlLoader` - positioned-span XHTML as emitted by PDF-to-HTML converters

pub mod loader;
pub mod plain_text;
pub mod word_dump;
pub mod xhtml;

pub use loader::DocumentLoader;
pub use plain_text::PlainTextLoader;
pub use word_dump::WordDumpLoader;
pub use xhtml::XhtmlLoader;

use crate::error::{ListingError, Result};
use crate::types::ListingDocument;
use std::path::Path;

/// Loader enum for runtime selection by file type
#[derive(Debug, Clone)]
pub enum LoaderImpl {
    PlainText(PlainTextLoader),
    WordDump(WordDumpLoader),
    Xhtml(XhtmlLoader),
}

impl LoaderImpl {
    pub fn all() -> Vec<LoaderImpl> {
        vec![
            LoaderImpl::PlainText(PlainTextLoader),
            LoaderImpl::WordDump(WordDumpLoader),
            LoaderImpl::Xhtml(XhtmlLoader),
        ]
    }
}

impl DocumentLoader for LoaderImpl {
    fn load(&self, bytes: &[u8]) -> Result<ListingDocument> {
        match self {
            LoaderImpl::PlainText(loader) => loader.load(bytes),
            LoaderImpl::WordDump(loader) => loader.load(bytes),
            LoaderImpl::Xhtml(loader) => loader.load(bytes),
        }
    }

    fn name(&self) -> &str {
        match self {
            LoaderImpl::PlainText(loader) => loader.name(),
            LoaderImpl::WordDump(loader) => loader.name(),
            LoaderImpl::Xhtml(loader) => loader.name(),
        }
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        match self {
            LoaderImpl::PlainText(loader) => loader.supports_file_type(path),
            LoaderImpl::WordDump(loader) => loader.supports_file_type(path),
            LoaderImpl::Xhtml(loader) => loader.supports_file_type(path),
        }
    }
}

/// Pick the loader for a file by its extension
pub fn loader_for_path(path: &Path) -> Result<LoaderImpl> {
    LoaderImpl::all()
        .into_iter()
        .find(|loader| loader.supports_file_type(path))
        .ok_or_else(|| {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("<none>");
            ListingError::UnsupportedFormat(format!("{} (extension '{extension}')", path.display()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_selected_by_extension() {
        let name_for = |path: &str| loader_for_path(Path::new(path)).unwrap().name().to_string();
        assert_eq!(name_for("a/listing.txt"), "PlainTextLoader");
        assert_eq!(name_for("listing.JSON"), "WordDumpLoader");
        assert_eq!(name_for("listing.xhtml"), "XhtmlLoader");
        assert_eq!(name_for("listing.html"), "XhtmlLoader");
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert!(matches!(
            loader_for_path(Path::new("listing.docx")),
            Err(ListingError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            loader_for_path(Path::new("listing")),
            Err(ListingError::UnsupportedFormat(_))
        ));
    }
}
