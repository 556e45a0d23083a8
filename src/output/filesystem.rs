//! Filesystem sink: one CSV and one image folder per category under a data root
//!
//! ```text
//! <data-root>/<slug(category)>.csv
//! <data-root>/<slug(category)>/<slug(title[..max])>.jpg
//! ```

use crate::catalog::ProductRecord;
use crate::config::OutputConfig;
use crate::output::csv_output::write_records;
use crate::output::slug::{slugify, truncate_chars};
use crate::output::traits::{CatalogSink, OutputError, OutputResult};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSION: &str = "jpg";

/// Writes categories below a data root directory
#[derive(Debug, Clone)]
pub struct FsCatalogSink {
    data_root: PathBuf,
    title_max_chars: usize,
}

impl FsCatalogSink {
    pub fn new(data_root: impl Into<PathBuf>, title_max_chars: usize) -> Self {
        Self {
            data_root: data_root.into(),
            title_max_chars,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.data_root.clone(), config.title_max_chars)
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Returns the CSV path of a category
    pub fn csv_path(&self, category_name: &str) -> PathBuf {
        self.data_root.join(format!("{}.csv", slugify(category_name)))
    }

    /// Returns the image folder of a category
    pub fn image_dir(&self, category_name: &str) -> PathBuf {
        self.data_root.join(slugify(category_name))
    }

    /// Returns the image path of a product within its category folder
    pub fn image_path(&self, category_name: &str, product_title: &str) -> PathBuf {
        let title = truncate_chars(product_title, self.title_max_chars);
        self.image_dir(category_name)
            .join(format!("{}.{}", slugify(title), IMAGE_EXTENSION))
    }
}

fn create_dir(path: &Path) -> OutputResult<()> {
    fs::create_dir_all(path).map_err(|e| OutputError::io(path, e))
}

impl CatalogSink for FsCatalogSink {
    fn write_records(
        &mut self,
        category_name: &str,
        records: &[ProductRecord],
    ) -> OutputResult<PathBuf> {
        create_dir(&self.data_root)?;

        let path = self.csv_path(category_name);
        let file = File::create(&path).map_err(|e| OutputError::io(&path, e))?;
        write_records(BufWriter::new(file), records)?;

        tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
        Ok(path)
    }

    fn write_image(
        &mut self,
        category_name: &str,
        product_title: &str,
        bytes: &[u8],
    ) -> OutputResult<PathBuf> {
        create_dir(&self.image_dir(category_name))?;

        let path = self.image_path(category_name, product_title);
        fs::write(&path, bytes).map_err(|e| OutputError::io(&path, e))?;

        Ok(path)
    }
}
