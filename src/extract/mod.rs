//! Product field extraction
//!
//! Each extractor reads one field from a parsed product page through the
//! `ExtractionMap`, then applies the field's text transformation:
//!
//! | Field | Transformation |
//! |-------|----------------|
//! | upc, title, description | text as-is |
//! | prices | one leading currency symbol removed |
//! | stock | first run of digits, as `u32` |
//! | rating | second class token, English word to `1..=5` |
//! | category | first and last character removed |
//! | image | `src` with its relative prefix replaced by the image origin |

mod rules;
mod text;

pub use rules::{ExtractionMap, Field, SelectorRule};
pub use text::{
    first_digit_run, parse_stock_count, rating_from_word, strip_currency_symbol,
    strip_enclosing_chars, strip_known_prefix, IMAGE_SRC_PREFIX_LEN, PRODUCT_HREF_PREFIX_LEN,
};

pub(crate) use rules::parse_selector;

use crate::catalog::ProductRecord;
use crate::config::SiteConfig;
use crate::HarvestError;
use scraper::Html;

/// Position of the rating word among the rating element's class tokens
const RATING_CLASS_POSITION: usize = 1;

pub fn extract_upc(document: &Html, map: &ExtractionMap) -> Result<String, HarvestError> {
    map.rule(Field::Upc).text(Field::Upc, document)
}

pub fn extract_title(document: &Html, map: &ExtractionMap) -> Result<String, HarvestError> {
    map.rule(Field::Title).text(Field::Title, document)
}

pub fn extract_price_excluding_tax(
    document: &Html,
    map: &ExtractionMap,
) -> Result<String, HarvestError> {
    extract_price(document, map, Field::PriceExcludingTax)
}

pub fn extract_price_including_tax(
    document: &Html,
    map: &ExtractionMap,
) -> Result<String, HarvestError> {
    extract_price(document, map, Field::PriceIncludingTax)
}

fn extract_price(
    document: &Html,
    map: &ExtractionMap,
    field: Field,
) -> Result<String, HarvestError> {
    let raw = map.rule(field).text(field, document)?;
    Ok(strip_currency_symbol(&raw).to_string())
}

/// Extracts the stock count from text such as `In stock (22 available)`
pub fn extract_stock_count(document: &Html, map: &ExtractionMap) -> Result<u32, HarvestError> {
    let raw = map.rule(Field::Stock).text(Field::Stock, document)?;
    parse_stock_count(&raw).map_err(|message| HarvestError::Parse {
        field: Field::Stock.name(),
        message,
    })
}

pub fn extract_description(document: &Html, map: &ExtractionMap) -> Result<String, HarvestError> {
    map.rule(Field::Description).text(Field::Description, document)
}

/// Extracts the star rating encoded as a class token (`star-rating Three`)
pub fn extract_rating(document: &Html, map: &ExtractionMap) -> Result<u8, HarvestError> {
    let word = map
        .rule(Field::Rating)
        .class_token(Field::Rating, document, RATING_CLASS_POSITION)?;
    rating_from_word(&word).ok_or_else(|| HarvestError::Parse {
        field: Field::Rating.name(),
        message: format!("unrecognized rating word '{}'", word),
    })
}

/// Extracts the category name from the product breadcrumb
pub fn extract_category(document: &Html, map: &ExtractionMap) -> Result<String, HarvestError> {
    let raw = map.rule(Field::Category).text(Field::Category, document)?;
    Ok(strip_enclosing_chars(&raw).to_string())
}

/// Extracts the absolute image URL: `image_origin` followed by the image `src`
/// minus its first `src_skip` characters
pub fn extract_image_url(
    document: &Html,
    map: &ExtractionMap,
    image_origin: &str,
    src_skip: usize,
) -> Result<String, HarvestError> {
    let src = map.rule(Field::Image).attr(Field::Image, document, "src")?;
    Ok(format!("{}{}", image_origin, strip_known_prefix(&src, src_skip)))
}

/// Runs every extractor against one product page
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    map: ExtractionMap,
    image_origin: String,
    image_src_skip: usize,
}

impl ProductExtractor {
    pub fn new(map: ExtractionMap, image_origin: String, image_src_skip: usize) -> Self {
        Self {
            map,
            image_origin,
            image_src_skip,
        }
    }

    /// Creates an extractor with the standard map and the configured site layout
    pub fn from_site(site: &SiteConfig) -> Result<Self, HarvestError> {
        Ok(Self::new(
            ExtractionMap::standard()?,
            site.image_origin(),
            site.image_src_skip,
        ))
    }

    pub fn map(&self) -> &ExtractionMap {
        &self.map
    }

    /// Builds a `ProductRecord`; nothing is returned unless every field succeeds
    pub fn extract(
        &self,
        document: &Html,
        source_url: &str,
    ) -> Result<ProductRecord, HarvestError> {
        let map = &self.map;
        Ok(ProductRecord {
            source_url: source_url.to_string(),
            upc: extract_upc(document, map)?,
            title: extract_title(document, map)?,
            price_including_tax: extract_price_including_tax(document, map)?,
            price_excluding_tax: extract_price_excluding_tax(document, map)?,
            stock_count: extract_stock_count(document, map)?,
            description: extract_description(document, map)?,
            category_name: extract_category(document, map)?,
            rating: extract_rating(document, map)?,
            image_url: extract_image_url(document, map, &self.image_origin, self.image_src_skip)?,
        })
    }
}
