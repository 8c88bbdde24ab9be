// Loader abstraction for listing extraction
//
// This module defines the boundary between reading source documents and
// extracting fields. Everything after a loader works with ListingDocument and
// is format-agnostic.

use crate::error::Result;
use crate::types::ListingDocument;
use std::path::Path;

/// Converts a source document into flat text plus word tokens.
///
/// Loaders never interpret listing content; they only recover text and
/// geometry. A document without text or tokens loads as an empty
/// ListingDocument, not an error.
pub trait DocumentLoader {
    /// Parse document bytes
    fn load(&self, bytes: &[u8]) -> Result<ListingDocument>;

    /// Read a file and parse its bytes
    fn load_file(&self, path: &Path) -> Result<ListingDocument> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes)
    }

    /// Loader name for logging and document metadata
    fn name(&self) -> &str;

    /// Check if the loader handles the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

/// Case-insensitive extension check shared by the loaders
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| extensions.contains(&e.as_str()))
}

/// Loader input must be UTF-8
pub(crate) fn decode_utf8<'a>(loader: &str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| crate::error::ListingError::Load {
        loader: loader.to_string(),
        message: format!("input is not valid UTF-8: {e}"),
    })
}
