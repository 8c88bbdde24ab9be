//! Output naming and pipeline stage dumps for the CLI.

use anyhow::{Context, Result};
use listing_core::PipelineStages;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// `<input stem>_listing.<ext>` next to the current directory
pub fn default_output_path(input: &str, format: &str) -> String {
    let input_name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("listing_output");
    let extension = if format == "json" { "json" } else { "xml" };
    format!("{input_name}_listing.{extension}")
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write every captured stage plus a summary.json into `output_dir`
pub fn save_stages(stages: &PipelineStages, input_path: &str, output_dir: &str) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating stage directory {output_dir}"))?;

    // Stage 1: loader output
    let text_path = format!("{}/stage1_text.txt", output_dir);
    fs::write(&text_path, &stages.text)?;
    println!("  💾 {} ({} chars)", text_path, stages.text.len());

    let tokens_path = format!("{}/stage1_tokens.json", output_dir);
    fs::write(&tokens_path, serde_json::to_string_pretty(&stages.tokens)?)?;
    println!("  💾 {} ({} tokens)", tokens_path, stages.tokens.len());

    // Stage 2: reconstructed lines
    let lines_path = format!("{}/stage2_lines.json", output_dir);
    fs::write(&lines_path, serde_json::to_string_pretty(&stages.lines)?)?;
    println!("  💾 {} ({} lines)", lines_path, stages.lines.len());

    // Stage 3: record with provenance, plus the rendered XML
    let extraction_path = format!("{}/stage3_extraction.json", output_dir);
    stages.extraction.save_with_format(&extraction_path, "json")?;
    println!("  💾 {}", extraction_path);

    let xml_path = format!("{}/stage3_listing.xml", output_dir);
    stages.extraction.save_with_format(&xml_path, "xml")?;
    println!("  💾 {}", xml_path);

    // Summary file: quick reference for validation scripts
    let input_bytes = fs::read(input_path).with_context(|| format!("reading {input_path}"))?;
    let decided: serde_json::Map<String, serde_json::Value> = stages
        .extraction
        .provenance
        .iter()
        .map(|p| {
            let strategy = p
                .strategy
                .map(|s| serde_json::Value::String(s.to_string()))
                .unwrap_or(serde_json::Value::Null);
            (p.field.to_string(), strategy)
        })
        .collect();
    let summary = serde_json::json!({
        "input": input_path,
        "input_sha256": sha256_hex(&input_bytes),
        "loader": stages.loader,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "stage_counts": {
            "text_chars": stages.text.len(),
            "tokens": stages.tokens.len(),
            "lines": stages.lines.len(),
            "filled_fields": stages.extraction.record.filled_field_count(),
        },
        "provenance": decided,
    });
    let summary_path = format!("{}/summary.json", output_dir);
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_follows_input_stem_and_format() {
        assert_eq!(default_output_path("docs/cabin.txt", "xml"), "cabin_listing.xml");
        assert_eq!(default_output_path("docs/cabin.json", "json"), "cabin_listing.json");
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
