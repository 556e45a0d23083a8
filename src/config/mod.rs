//! Configuration module for Shelf-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file harvests books.toscrape.com
//! into `./data`.
//!
//! # Example
//!
//! ```no_run
//! use shelf_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting {}", config.site.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HarvestConfig, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig,
    DEFAULT_ROOT_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
