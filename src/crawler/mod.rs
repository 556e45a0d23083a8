//! Crawler module for storefront traversal
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching of pages and images
//! - Category discovery from the site navigation
//! - Pagination following within a category
//! - Overall harvest orchestration

mod categories;
mod fetcher;
mod orchestrator;
mod paginator;

pub use categories::{list_categories, parse_category_links, parse_category_name};
pub use fetcher::{build_http_client, PageFetcher};
pub use orchestrator::{run_harvest, CategoryOutcome, Harvester};
pub use paginator::{next_page_url, parse_listing_page, ListingPage, Paginator};
