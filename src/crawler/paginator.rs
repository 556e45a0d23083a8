//! Category pagination
//!
//! A category's products are spread over `index.html`, `page-2.html`,
//! `page-3.html`, ... in the same directory. Each listing page links its
//! products as `.product_pod > h3 > a` and shows a `.next` control while more
//! pages follow.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::extract::{parse_selector, strip_known_prefix};
use crate::HarvestError;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

const PRODUCT_LINK_SELECTOR: &str = ".product_pod > h3 > a";
const NEXT_CONTROL_SELECTOR: &str = ".next";

/// Products found on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute product URLs, in page order
    pub product_urls: Vec<String>,

    /// True if the page shows a "next" control
    pub has_next: bool,
}

/// Parses one category listing page
///
/// Product hrefs are rebased as `catalogue_base` followed by the href minus
/// its first `href_skip` characters.
pub fn parse_listing_page(
    document: &Html,
    catalogue_base: &str,
    href_skip: usize,
) -> Result<ListingPage, HarvestError> {
    let link_selector = parse_selector(PRODUCT_LINK_SELECTOR)?;
    let next_selector = parse_selector(NEXT_CONTROL_SELECTOR)?;

    let product_urls = document
        .select(&link_selector)
        .map(|anchor| {
            anchor
                .value()
                .attr("href")
                .map(|href| format!("{}{}", catalogue_base, strip_known_prefix(href, href_skip)))
                .ok_or_else(|| HarvestError::Extraction {
                    field: "product_page_url",
                    selector: PRODUCT_LINK_SELECTOR.to_string(),
                    detail: "missing attribute 'href'".to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let has_next = document.select(&next_selector).next().is_some();

    Ok(ListingPage {
        product_urls,
        has_next,
    })
}

/// Returns the URL of listing page `page_number` (2, 3, ...) of the category
/// whose current page is `current_url`
///
/// The last path segment of `current_url` is replaced by `page-{n}.html`.
pub fn next_page_url(current_url: &str, page_number: u32) -> Result<String, HarvestError> {
    let current = Url::parse(current_url)?;
    let next = current.join(&format!("page-{}.html", page_number))?;
    Ok(next.to_string())
}

/// Follows a category's pagination and collects its product URLs
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    fetcher: &'a PageFetcher,
    catalogue_base: String,
    href_skip: usize,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(
        fetcher: &'a PageFetcher,
        catalogue_base: String,
        href_skip: usize,
        max_pages: u32,
    ) -> Self {
        Self {
            fetcher,
            catalogue_base,
            href_skip,
            max_pages,
        }
    }

    pub fn from_config(fetcher: &'a PageFetcher, config: &Config) -> Self {
        Self::new(
            fetcher,
            config.site.catalogue_base(),
            config.site.product_href_skip,
            config.harvest.max_pages,
        )
    }

    /// Parses a listing page with this paginator's catalogue base
    pub fn parse_page(&self, document: &Html) -> Result<ListingPage, HarvestError> {
        parse_listing_page(document, &self.catalogue_base, self.href_skip)
    }

    /// Lists every product URL of the category starting at `first_page_url`
    ///
    /// Pages are fetched until one has no "next" control. URLs keep
    /// pagination order; a URL already seen on an earlier page is skipped.
    pub async fn list_product_urls(
        &self,
        first_page_url: &str,
    ) -> Result<Vec<String>, HarvestError> {
        let first_page = self.fetch_page(first_page_url).await?;
        self.list_product_urls_from(first_page_url, first_page).await
    }

    /// Same as `list_product_urls`, with the first page already parsed
    ///
    /// Only pages 2 and later are fetched.
    pub async fn list_product_urls_from(
        &self,
        first_page_url: &str,
        first_page: ListingPage,
    ) -> Result<Vec<String>, HarvestError> {
        let mut product_urls = Vec::new();
        let mut seen = HashSet::new();
        let mut page_url = first_page_url.to_string();
        let mut page_number = 1;
        let mut page = first_page;

        loop {
            tracing::debug!(
                "Listing page {} ({}): {} products",
                page_number,
                page_url,
                page.product_urls.len()
            );

            for url in page.product_urls {
                if seen.insert(url.clone()) {
                    product_urls.push(url);
                } else {
                    tracing::debug!("Skipping repeated product link {}", url);
                }
            }

            if !page.has_next {
                break;
            }

            if page_number >= self.max_pages {
                return Err(HarvestError::Parse {
                    field: "pagination",
                    message: format!(
                        "{} still shows a next control after {} pages",
                        first_page_url, self.max_pages
                    ),
                });
            }

            page_number += 1;
            page_url = next_page_url(&page_url, page_number)?;
            page = self.fetch_page(&page_url).await?;
        }

        Ok(product_urls)
    }

    async fn fetch_page(&self, url: &str) -> Result<ListingPage, HarvestError> {
        let document = self.fetcher.fetch_document(url).await?;
        self.parse_page(&document)
    }
}
