//! Harvest orchestration
//!
//! For each category in the site navigation:
//! 1. Fetch the landing page once and read its breadcrumb display name
//! 2. Follow pagination from that page to list every product URL
//! 3. Fetch each product page once and extract a full `ProductRecord`
//! 4. Hand all records to the sink as one CSV
//! 5. Download each record's image into the category's image folder
//!
//! Everything runs sequentially. The first error aborts the run; files already
//! written stay on disk.

use crate::catalog::{CategoryListing, ProductRecord};
use crate::config::Config;
use crate::crawler::categories::{list_categories, parse_category_name};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::paginator::{ListingPage, Paginator};
use crate::extract::ProductExtractor;
use crate::output::{CatalogSink, CategoryReport, FsCatalogSink, RunReport};
use crate::HarvestError;
use std::time::Instant;

/// What happened to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// The category was written to the sink
    Harvested(CategoryReport),

    /// The category filter excluded it; carries the display name
    Skipped(String),
}

/// Drives a harvest run against one storefront and one sink
pub struct Harvester<S: CatalogSink> {
    config: Config,
    fetcher: PageFetcher,
    extractor: ProductExtractor,
    sink: S,
}

impl<S: CatalogSink> Harvester<S> {
    /// Creates a harvester with an HTTP client built from the configuration
    pub fn new(config: Config, sink: S) -> Result<Self, HarvestError> {
        let fetcher = PageFetcher::from_config(&config)?;
        Self::with_fetcher(config, fetcher, sink)
    }

    pub fn with_fetcher(
        config: Config,
        fetcher: PageFetcher,
        sink: S,
    ) -> Result<Self, HarvestError> {
        let extractor = ProductExtractor::from_site(&config.site)?;
        Ok(Self {
            config,
            fetcher,
            extractor,
            sink,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Harvests every category listed in the site navigation
    pub async fn run(&mut self) -> Result<RunReport, HarvestError> {
        let mut report = RunReport::start();
        let start_time = Instant::now();

        let root = self.config.site.root_base();
        tracing::info!("Starting harvest of {}", root);

        let category_urls = list_categories(&self.fetcher, &root).await?;

        for category_url in &category_urls {
            match self.harvest_category(category_url).await? {
                CategoryOutcome::Harvested(category) => report.categories.push(category),
                CategoryOutcome::Skipped(name) => report.skipped_categories.push(name),
            }
        }

        report.finish();
        tracing::info!(
            "Harvest completed: {} categories, {} products, {} images in {:?}",
            report.categories.len(),
            report.total_products(),
            report.total_images(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Harvests one category into the sink
    pub async fn harvest_category(
        &mut self,
        category_url: &str,
    ) -> Result<CategoryOutcome, HarvestError> {
        let (category_name, first_page) = {
            let document = self.fetcher.fetch_document(category_url).await?;
            let category_name = parse_category_name(&document, self.extractor.map())?;

            if !self.config.harvest.includes(&category_name) {
                tracing::debug!("Skipping category '{}' (not in filter)", category_name);
                return Ok(CategoryOutcome::Skipped(category_name));
            }

            let paginator = Paginator::from_config(&self.fetcher, &self.config);
            (category_name, paginator.parse_page(&document)?)
        };

        let listing = self
            .build_listing(category_name, category_url, first_page)
            .await?;
        tracing::info!(
            "Harvesting category '{}' ({} products)",
            listing.category_name,
            listing.len()
        );

        let records = self.extract_records(&listing).await?;

        tracing::info!("Writing CSV for '{}'", listing.category_name);
        let csv_path = self.sink.write_records(&listing.category_name, &records)?;

        let images_written = if self.config.harvest.skip_images {
            0
        } else {
            tracing::info!("Downloading images for '{}'", listing.category_name);
            self.download_images(&listing.category_name, &records).await?
        };

        Ok(CategoryOutcome::Harvested(CategoryReport {
            name: listing.category_name,
            url: listing.category_url,
            products: records.len(),
            csv_path,
            images_written,
        }))
    }

    /// Enumerates a category's product URLs through its pagination
    ///
    /// `first_page` is the already parsed landing page at `category_url`.
    pub async fn build_listing(
        &self,
        category_name: String,
        category_url: &str,
        first_page: ListingPage,
    ) -> Result<CategoryListing, HarvestError> {
        let paginator = Paginator::from_config(&self.fetcher, &self.config);
        let product_urls = paginator
            .list_product_urls_from(category_url, first_page)
            .await?;
        Ok(CategoryListing::new(
            category_name,
            category_url.to_string(),
            product_urls,
        ))
    }

    /// Fetches one product page and extracts its record
    pub async fn extract_product(&self, product_url: &str) -> Result<ProductRecord, HarvestError> {
        let document = self.fetcher.fetch_document(product_url).await?;
        self.extractor.extract(&document, product_url)
    }

    async fn extract_records(
        &self,
        listing: &CategoryListing,
    ) -> Result<Vec<ProductRecord>, HarvestError> {
        let mut records = Vec::with_capacity(listing.len());
        for product_url in &listing.product_urls {
            let record = self.extract_product(product_url).await?;
            tracing::debug!("Extracted '{}' from {}", record.title, product_url);
            records.push(record);
        }
        Ok(records)
    }

    async fn download_images(
        &mut self,
        category_name: &str,
        records: &[ProductRecord],
    ) -> Result<usize, HarvestError> {
        let mut written = 0;
        for record in records {
            let bytes = self.fetcher.fetch_bytes(&record.image_url).await?;
            let path = self.sink.write_image(category_name, &record.title, &bytes)?;
            tracing::debug!("Saved {} ({} bytes)", path.display(), bytes.len());
            written += 1;
        }
        Ok(written)
    }
}

/// Runs a complete harvest into the configured data root
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. List categories from the site root
/// 3. Harvest each category into `<data-root>`
///
/// # Returns
///
/// * `Ok(RunReport)` - Every category was harvested
/// * `Err(HarvestError)` - The run aborted; earlier output remains on disk
pub async fn run_harvest(config: Config) -> Result<RunReport, HarvestError> {
    let sink = FsCatalogSink::from_config(&config.output);
    let mut harvester = Harvester::new(config, sink)?;
    harvester.run().await
}
