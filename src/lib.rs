//! Product-Scout: a product page discovery and extraction pipeline
//!
//! This crate discovers candidate product pages on a site (sitemaps and
//! category listings), scores each page, matches it against a catalog of
//! known model identifiers and extracts descriptions and images from the
//! pages that qualify.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Product-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Assisted scoring requested but {0} is not set")]
    MissingCredential(String),
}

/// Result type alias for Product-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::ModelCatalog;
pub use config::Config;
pub use crawler::{CrawlReport, Orchestrator};
pub use extract::{ExtractedFields, ProductRecord};
pub use scoring::ScoringStrategy;
pub use state::PageOutcome;
pub use storage::{DiscoveryCache, SqliteDiscoveryCache};
