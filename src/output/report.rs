//! Run report: what a harvest wrote, per category

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of harvesting one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub name: String,
    pub url: String,

    /// Products discovered through pagination
    pub products: usize,

    /// CSV file written for the category
    pub csv_path: PathBuf,

    /// Number of image files written
    pub images_written: usize,
}

/// Summary of a full harvest run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub categories: Vec<CategoryReport>,

    /// Categories excluded by the category filter
    pub skipped_categories: Vec<String>,
}

impl RunReport {
    /// Starts a report stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories: Vec::new(),
            skipped_categories: Vec::new(),
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total_products(&self) -> usize {
        self.categories.iter().map(|c| c.products).sum()
    }

    pub fn total_images(&self) -> usize {
        self.categories.iter().map(|c| c.images_written).sum()
    }

    /// Returns the run duration once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &RunReport) {
    println!("=== Harvest Report ===\n");

    println!("Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = report.duration_seconds() {
        println!("Duration: {} seconds", duration);
    }
    println!();

    println!("Categories ({}):", report.categories.len());
    for category in &report.categories {
        println!(
            "  {}: {} products, {} images -> {}",
            category.name,
            category.products,
            category.images_written,
            category.csv_path.display()
        );
    }
    println!();

    if !report.skipped_categories.is_empty() {
        println!("Skipped by filter ({}):", report.skipped_categories.len());
        for name in &report.skipped_categories {
            println!("  - {}", name);
        }
        println!();
    }

    println!(
        "Total: {} products, {} images",
        report.total_products(),
        report.total_images()
    );
}
