//! Category discovery from the storefront's sidebar navigation

use crate::crawler::fetcher::PageFetcher;
use crate::extract::{parse_selector, ExtractionMap, Field};
use crate::HarvestError;
use scraper::Html;

const CATEGORY_LINK_SELECTOR: &str = ".nav.nav-list a";

/// Reads category URLs from the sidebar of the site root page
///
/// Each href is appended to `root_base`. The first link is the "all products"
/// pseudo-category and is dropped.
pub fn parse_category_links(document: &Html, root_base: &str) -> Result<Vec<String>, HarvestError> {
    let selector = parse_selector(CATEGORY_LINK_SELECTOR)?;

    let links = document
        .select(&selector)
        .map(|anchor| {
            anchor
                .value()
                .attr("href")
                .map(|href| format!("{}{}", root_base, href))
                .ok_or_else(|| HarvestError::Extraction {
                    field: "category_url",
                    selector: CATEGORY_LINK_SELECTOR.to_string(),
                    detail: "missing attribute 'href'".to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(links.into_iter().skip(1).collect())
}

/// Reads a category's display name from its landing page breadcrumb
pub fn parse_category_name(document: &Html, map: &ExtractionMap) -> Result<String, HarvestError> {
    let raw = map.rule(Field::Category).text(Field::Category, document)?;
    Ok(raw.trim().to_string())
}

/// Fetches the site root and lists every real category URL in navigation order
pub async fn list_categories(
    fetcher: &PageFetcher,
    root_base: &str,
) -> Result<Vec<String>, HarvestError> {
    let document = fetcher.fetch_document(root_base).await?;
    let categories = parse_category_links(&document, root_base)?;
    tracing::info!("Found {} categories at {}", categories.len(), root_base);
    Ok(categories)
}
