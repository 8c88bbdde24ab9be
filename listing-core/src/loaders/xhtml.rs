//! Positioned-span XHTML loader
//!
//! Parses the page markup emitted by PDF-to-HTML converters:
//! - Page divs (`<div class="page">`), one per rendered page
//! - Spans carrying `data-bbox="x,y,width,height"` (comma or space
//!   separated) and an optional `data-line` number
//!
//! Every span with a usable bounding box becomes a word token. Page text is
//! rebuilt line by line from the spans, so the flat text and the tokens
//! always describe the same content.

use super::loader::{decode_utf8, has_extension, DocumentLoader};
use crate::error::Result;
use crate::types::{DocumentMetadata, ListingDocument, WordToken};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

// Pre-compiled regexes for XHTML parsing
static PAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div class="page"[^>]*>(.*?)</div>"#).unwrap());

static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<body[^>]*>(.*?)</body>").unwrap());

static SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<span([^>]*)>([^<]*)</span>").unwrap());

static BBOX_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-bbox="([^"]*)""#).unwrap());

static LINE_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-line="([^"]*)""#).unwrap());

/// One span as found in the markup
#[derive(Debug, Clone)]
struct SpanRecord {
    text: String,
    position: Option<(f32, f32)>,
    line: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XhtmlLoader;

impl XhtmlLoader {
    /// Page bodies in document order. Markup without page divs is one page.
    fn pages(xhtml: &str) -> Vec<&str> {
        let pages: Vec<&str> = PAGE_REGEX
            .captures_iter(xhtml)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect();
        if !pages.is_empty() {
            return pages;
        }
        let body = BODY_REGEX
            .captures(xhtml)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
            .unwrap_or(xhtml);
        vec![body]
    }

    fn spans(page_html: &str) -> Vec<SpanRecord> {
        SPAN_REGEX
            .captures_iter(page_html)
            .filter_map(|cap| {
                let attrs = cap.get(1)?.as_str();
                let text = decode_entities(cap.get(2)?.as_str()).trim().to_string();
                if text.is_empty() {
                    return None;
                }
                let position = BBOX_ATTR_REGEX
                    .captures(attrs)
                    .and_then(|c| c.get(1))
                    .and_then(|m| parse_bbox(m.as_str()));
                let line = LINE_ATTR_REGEX
                    .captures(attrs)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().trim().parse::<u32>().ok());
                Some(SpanRecord {
                    text,
                    position,
                    line,
                })
            })
            .collect()
    }

    /// Spans grouped by `data-line`. Spans without a line number continue
    /// the line before them.
    fn page_text(spans: &[SpanRecord]) -> String {
        let mut lines: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        let mut current = 0u32;
        for span in spans {
            if let Some(line) = span.line {
                current = line;
            }
            lines.entry(current).or_default().push(&span.text);
        }
        lines
            .values()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse "x,y,width,height" (or space separated); only x and y are kept
fn parse_bbox(raw: &str) -> Option<(f32, f32)> {
    let parts: Vec<f32> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [x, y, _, _] | [x, y] if x.is_finite() && y.is_finite() => Some((*x, *y)),
        _ => None,
    }
}

/// Resolve character references and HTML named entities. Non-breaking
/// spaces become plain spaces; text with an unresolvable reference is kept
/// as written.
fn decode_entities(text: &str) -> String {
    match quick_xml::escape::unescape(text) {
        Ok(decoded) => decoded.replace('\u{a0}', " "),
        Err(e) => {
            debug!(error = %e, text, "unresolved entity in span text");
            text.to_string()
        }
    }
}

impl DocumentLoader for XhtmlLoader {
    fn load(&self, bytes: &[u8]) -> Result<ListingDocument> {
        let xhtml = decode_utf8(self.name(), bytes)?;
        let pages = Self::pages(xhtml);

        let mut page_texts = Vec::with_capacity(pages.len());
        let mut tokens = Vec::new();

        for (index, page_html) in pages.iter().enumerate() {
            let page_number = index as u32 + 1;
            let spans = Self::spans(page_html);
            page_texts.push(Self::page_text(&spans));
            tokens.extend(spans.iter().filter_map(|span| {
                span.position
                    .map(|(x, y)| WordToken::new(&span.text, x, y, page_number))
            }));
        }

        debug!(pages = pages.len(), tokens = tokens.len(), "xhtml loaded");

        Ok(ListingDocument {
            text: ListingDocument::join_pages(&page_texts),
            tokens,
            metadata: DocumentMetadata {
                page_count: pages.len() as u32,
                loader: self.name().to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        "XhtmlLoader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["xhtml", "html", "htm"])
    }
}
