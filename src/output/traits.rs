//! Output sink traits and errors
//!
//! A sink receives fully extracted records and image bodies. The harvester
//! never hands a sink a partially built record.

use crate::catalog::ProductRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for harvested categories
pub trait CatalogSink {
    /// Writes every record of a category, header first
    ///
    /// # Returns
    ///
    /// Where the records were written
    fn write_records(
        &mut self,
        category_name: &str,
        records: &[ProductRecord],
    ) -> OutputResult<PathBuf>;

    /// Stores one product image under the category
    ///
    /// # Returns
    ///
    /// Where the image was written
    fn write_image(
        &mut self,
        category_name: &str,
        product_title: &str,
        bytes: &[u8],
    ) -> OutputResult<PathBuf>;
}
