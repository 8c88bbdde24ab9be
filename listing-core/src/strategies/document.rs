//! Whole-document scans, the last resort of their chains.

use crate::matching::{extract_urls, first_integer};
use crate::types::FieldValue;

pub fn document_integer(text: &str) -> Option<FieldValue> {
    first_integer(text).map(FieldValue::Integer)
}

/// Always decides, possibly with no links
pub fn document_urls(text: &str) -> Option<FieldValue> {
    Some(FieldValue::Links(extract_urls(text)))
}
