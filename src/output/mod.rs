//! Output module for harvested categories
//!
//! This module handles:
//! - The `CatalogSink` seam between the harvester and storage
//! - Semicolon-delimited CSV rendering
//! - The filesystem sink (CSV files and image folders under a data root)
//! - Filename slugs
//! - The end-of-run report

mod csv_output;
mod filesystem;
pub mod report;
mod slug;
mod traits;

pub use csv_output::{render_records, write_records, CSV_DELIMITER};
pub use filesystem::FsCatalogSink;
pub use report::{print_report, CategoryReport, RunReport};
pub use slug::{slugify, truncate_chars};
pub use traits::{CatalogSink, OutputError, OutputResult};
