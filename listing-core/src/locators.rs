//! Section/field locators
//!
//! Labeled extraction over the flat document text:
//! - `label: value` on a single line ([`extract_field`])
//! - `label: content` running until the next known label ([`extract_section`])
//!
//! Both assume colon-delimited labels. Documents without labels produce
//! empty results; the layout strategies pick up from there.

use crate::error::Result;
use regex::Regex;

fn field_pattern(label: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"(?i){}[ \t]*:[ \t]*([^\r\n]*)",
        regex::escape(label)
    ))?)
}

fn label_pattern(label: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"(?i){}[ \t]*:", regex::escape(label)))?)
}

/// Remainder of the line after the first `label:` (case-insensitive),
/// trimmed. Empty when the label is absent or has nothing after it.
pub fn extract_field(text: &str, label: &str) -> String {
    if label.trim().is_empty() {
        return String::new();
    }
    let Ok(re) = field_pattern(label) else {
        return String::new();
    };
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Text after `label:` up to the nearest following stop label (any of
/// `stop_labels` followed by a colon), or to the end of the document when
/// none follows.
pub fn extract_section<S: AsRef<str>>(text: &str, label: &str, stop_labels: &[S]) -> String {
    match SectionLocator::new(stop_labels) {
        Ok(locator) => locator.section(text, label),
        Err(_) => String::new(),
    }
}

/// Section extraction with the stop-label alternation compiled once.
#[derive(Debug, Clone)]
pub struct SectionLocator {
    stop_pattern: Option<Regex>,
}

impl SectionLocator {
    pub fn new<S: AsRef<str>>(stop_labels: &[S]) -> Result<Self> {
        let mut alternatives: Vec<String> = stop_labels
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { stop_pattern: None });
        }

        // Longest first so "price per night" is tried before "price"
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        alternatives.dedup();

        let pattern = format!(r"(?i)(?:{})[ \t]*:", alternatives.join("|"));
        Ok(Self {
            stop_pattern: Some(Regex::new(&pattern)?),
        })
    }

    pub fn section(&self, text: &str, label: &str) -> String {
        if label.trim().is_empty() {
            return String::new();
        }
        let Ok(start_re) = label_pattern(label) else {
            return String::new();
        };
        let Some(start) = start_re.find(text) else {
            return String::new();
        };
        let content_start = start.end();

        let end = self
            .stop_pattern
            .as_ref()
            .and_then(|re| re.find_at(text, content_start))
            .map(|stop| cut_before_stop_line(text, content_start, stop.start()))
            .unwrap_or(text.len());

        text[content_start..end].trim().to_string()
    }
}

/// The stop label's line never belongs to the section. When the stop label
/// shares a line with the section label itself, cut at the stop label.
fn cut_before_stop_line(text: &str, content_start: usize, stop_start: usize) -> usize {
    let line_start = text[..stop_start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if line_start > content_start {
        line_start
    } else {
        stop_start
    }
}

/// Fail-fast check used at engine construction: every label must compile
/// into a locator pattern.
pub(crate) fn check_label(label: &str) -> Result<()> {
    field_pattern(label)?;
    label_pattern(label)?;
    Ok(())
}
