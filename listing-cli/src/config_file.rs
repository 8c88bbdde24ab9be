//! Config resolution for the CLI.

use anyhow::{Context, Result};
use listing_core::ExtractionConfig;

/// An explicit `--config` path must load; without one the defaults apply
pub fn load_config(path: Option<&str>) -> Result<ExtractionConfig> {
    match path {
        Some(p) => ExtractionConfig::load_from_file(p)
            .with_context(|| format!("failed to load config from {p}")),
        None => Ok(ExtractionConfig::load_with_fallback(None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(name: &str, yaml: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "listing_extract_{}_{}.yaml",
            name,
            std::process::id()
        ));
        fs::write(&path, yaml).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn no_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), ExtractionConfig::default());
    }

    #[test]
    fn misspelled_strategy_is_reported() {
        let path = write_config(
            "typo",
            "pipeline:\n  fields:\n    PricePerNight:\n      - strategy: DocumentIntegr\n",
        );
        let err = load_config(Some(&path)).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains(&path));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_config(Some("/nonexistent/listing.yaml")).is_err());
    }

    #[test]
    fn explicit_partial_config_is_used() {
        let path = write_config("partial", "layout:\n  top_threshold: 42.0\n");
        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.layout.top_threshold, 42.0);
        assert_eq!(config.pipeline, ExtractionConfig::default().pipeline);
    }
}
