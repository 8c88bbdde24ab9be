// All extraction functionality is in listing-extract-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod config_file;
pub mod stage_dump;

// Re-export core types for convenience
pub use listing_core::*;

// Re-export CLI utilities
pub use config_file::load_config;
pub use stage_dump::{default_output_path, save_stages, sha256_hex};
