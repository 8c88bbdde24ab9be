//! Layout reconstruction from word geometry.
//!
//! Word tokens are grouped into lines by quantizing their vertical position
//! into fixed-height buckets (roughly one line-height). Within a bucket words
//! are joined left to right; buckets are visited page by page, top to bottom.
//! On top of the reconstructed lines sit two region heuristics used when the
//! document carries no usable labels: the title zone at the top of the first
//! page, and a description bounded by the first stop heading.

use crate::config::LayoutConfig;
use crate::error::{ListingError, Result};
use crate::matching::contains_any;
use crate::types::WordToken;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of text recovered from word positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructedLine {
    pub page_number: u32,
    /// Quantized vertical position (`floor(y / bucket_width)`)
    pub bucket: i64,
    /// Smallest token `y` in the line
    pub y: f32,
    pub text: String,
}

/// Candidate title from the top of the first page, with a trailing price
/// split off when one was present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleZone {
    pub title: String,
    pub price: Option<u64>,
}

/// Group tokens into lines by `(page, floor(y / bucket_width))`.
///
/// A non-positive or non-finite bucket width falls back to 1.0.
pub fn reconstruct_lines(tokens: &[WordToken], bucket_width: f32) -> Vec<ReconstructedLine> {
    let width = if bucket_width.is_finite() && bucket_width > 0.0 {
        bucket_width
    } else {
        1.0
    };

    let mut buckets: BTreeMap<(u32, i64), Vec<&WordToken>> = BTreeMap::new();
    for token in tokens {
        if token.text.trim().is_empty() {
            continue;
        }
        let bucket = (token.y / width).floor() as i64;
        buckets
            .entry((token.page_number, bucket))
            .or_default()
            .push(token);
    }

    buckets
        .into_iter()
        .map(|((page_number, bucket), mut words)| {
            // Stable sort: equal x keeps document order
            words.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            let y = words.iter().map(|w| w.y).fold(f32::INFINITY, f32::min);
            let text = words
                .iter()
                .map(|w| w.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            ReconstructedLine {
                page_number,
                bucket,
                y,
                text,
            }
        })
        .collect()
}

/// Accumulate lines until one contains a stop keyword. Lines shorter than
/// `min_line_length` characters are skipped (isolated labels, page furniture),
/// but a short line still ends accumulation when it is a stop heading.
pub fn bounded_description<S: AsRef<str>>(
    lines: &[ReconstructedLine],
    stop_keywords: &[S],
    min_line_length: usize,
) -> String {
    let mut kept = Vec::new();
    for line in lines {
        let text = line.text.trim();
        if contains_any(text, stop_keywords) {
            break;
        }
        if text.chars().count() < min_line_length {
            continue;
        }
        kept.push(text);
    }
    kept.join(" ")
}

fn trailing_price_pattern<S: AsRef<str>>(currency_markers: &[S]) -> Result<Option<Regex>> {
    let mut markers: Vec<String> = currency_markers
        .iter()
        .map(|m| m.as_ref().trim())
        .filter(|m| !m.is_empty())
        .map(regex::escape)
        .collect();
    if markers.is_empty() {
        return Ok(None);
    }
    markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    markers.dedup();

    let pattern = format!(
        r"(?i)^(.*?)[\s,:|\-–]*([0-9]+)\s*(?:{})\.?(?:\s*(?:/|per)\s*night)?\s*$",
        markers.join("|")
    );
    Ok(Some(Regex::new(&pattern)?))
}

/// Split a trailing "<digits> <currency>" off a title.
pub fn strip_trailing_price<S: AsRef<str>>(title: &str, currency_markers: &[S]) -> TitleZone {
    match trailing_price_pattern(currency_markers) {
        Ok(Some(re)) => split_price(title, &re),
        _ => TitleZone {
            title: title.trim().to_string(),
            price: None,
        },
    }
}

fn split_price(title: &str, re: &Regex) -> TitleZone {
    let trimmed = title.trim();
    match re.captures(trimmed) {
        Some(caps) => {
            let price = caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok());
            let head = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            match price {
                Some(price) => TitleZone {
                    title: head.to_string(),
                    price: Some(price),
                },
                None => TitleZone {
                    title: trimmed.to_string(),
                    price: None,
                },
            }
        }
        None => TitleZone {
            title: trimmed.to_string(),
            price: None,
        },
    }
}

fn first_page(lines: &[ReconstructedLine]) -> Option<u32> {
    lines.iter().map(|l| l.page_number).min()
}

fn in_title_zone(line: &ReconstructedLine, first_page: u32, top_threshold: f32) -> bool {
    line.page_number == first_page && line.y < top_threshold
}

fn title_from_lines(
    lines: &[ReconstructedLine],
    top_threshold: f32,
    trailing_price: Option<&Regex>,
) -> TitleZone {
    let Some(page) = first_page(lines) else {
        return TitleZone::default();
    };

    let raw = lines
        .iter()
        .filter(|l| in_title_zone(l, page, top_threshold))
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match trailing_price {
        Some(re) => split_price(&raw, re),
        None => TitleZone {
            title: raw.trim().to_string(),
            price: None,
        },
    }
}

/// Title candidate from the tokens above `top_threshold` on the first page,
/// with any trailing price split off.
pub fn title_zone<S: AsRef<str>>(
    tokens: &[WordToken],
    top_threshold: f32,
    bucket_width: f32,
    currency_markers: &[S],
) -> TitleZone {
    let lines = reconstruct_lines(tokens, bucket_width);
    let pattern = trailing_price_pattern(currency_markers).ok().flatten();
    title_from_lines(&lines, top_threshold, pattern.as_ref())
}

/// Layout heuristics bound to one validated [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct LayoutReconstructor {
    bucket_width: f32,
    top_threshold: f32,
    min_line_length: usize,
    stop_keywords: Vec<String>,
    trailing_price: Option<Regex>,
}

impl LayoutReconstructor {
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        if !(config.bucket_width.is_finite() && config.bucket_width > 0.0) {
            return Err(ListingError::InvalidConfig(format!(
                "layout.bucket_width must be a positive number, got {}",
                config.bucket_width
            )));
        }
        if !config.top_threshold.is_finite() {
            return Err(ListingError::InvalidConfig(
                "layout.top_threshold must be finite".to_string(),
            ));
        }

        Ok(Self {
            bucket_width: config.bucket_width,
            top_threshold: config.top_threshold,
            min_line_length: config.min_line_length,
            stop_keywords: config.stop_keywords.clone(),
            trailing_price: trailing_price_pattern(&config.currency_markers)?,
        })
    }

    pub fn lines(&self, tokens: &[WordToken]) -> Vec<ReconstructedLine> {
        reconstruct_lines(tokens, self.bucket_width)
    }

    /// Lines at the top of the first page, joined into a title candidate
    pub fn title_zone(&self, lines: &[ReconstructedLine]) -> TitleZone {
        title_from_lines(lines, self.top_threshold, self.trailing_price.as_ref())
    }

    /// Description from the lines below the title zone
    pub fn bounded_description(&self, lines: &[ReconstructedLine]) -> String {
        let Some(page) = first_page(lines) else {
            return String::new();
        };
        let body: Vec<ReconstructedLine> = lines
            .iter()
            .filter(|l| !in_title_zone(l, page, self.top_threshold))
            .cloned()
            .collect();
        bounded_description(&body, &self.stop_keywords, self.min_line_length)
    }
}
