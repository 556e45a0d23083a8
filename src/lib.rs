//! Shelf-Harvest: a catalog harvester for paginated book storefronts
//!
//! This crate walks a storefront's category navigation, follows each category's
//! pagination to discover every product page, extracts a fixed set of fields
//! from each product, and writes one CSV file plus one image folder per category.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;

use thiserror::Error;

/// Main error type for Shelf-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Extraction failed for {field} ('{selector}'): {detail}")]
    Extraction {
        field: &'static str,
        selector: String,
        detail: String,
    },

    #[error("Failed to parse {field}: {message}")]
    Parse {
        field: &'static str,
        message: String,
    },

    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Network and HTTP status failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
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
}

/// Result type alias for Shelf-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CategoryListing, ProductRecord};
pub use config::Config;
pub use crawler::{run_harvest, Harvester, PageFetcher};
pub use extract::{ExtractionMap, Field};
