//! Quote-Harvest: an incremental quotes-site exporter
//!
//! This crate crawls the tag-listing pages of a quotes website, extracts
//! structured quote records, deduplicates them against everything already
//! persisted, and appends the new rows to per-category CSV files plus an
//! optional shared Google Sheet.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod state;
pub mod text;

use thiserror::Error;

/// Main error type for Quote-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV sink error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Sheet sink error: {0}")]
    Sheet(#[from] output::SheetError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CategoryPhase,
        to: state::CategoryPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Quote-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{parse_selection, Category, CATALOG};
pub use config::Settings;
pub use record::QuoteRecord;
pub use state::{CategoryPhase, DedupLedger};
pub use text::dedup_key;
