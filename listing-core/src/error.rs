use thiserror::Error;

/// Failures surfaced by the collaborators around the engine (loading,
/// configuration, serialization). Extraction itself never fails.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("{loader} could not load document: {message}")]
    Load { loader: String, message: String },

    #[error("invalid vocabulary table '{table}': {reason}")]
    InvalidVocabulary { table: String, reason: String },

    #[error("invalid extraction config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ListingError>;
