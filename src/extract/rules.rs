//! Named extraction map
//!
//! Each product field is located by a `SelectorRule`: a CSS selector plus the
//! index of the match to read. The storefront's pages are positional (the
//! fourth `td`, the third `p`), so the rules are too; swapping a rule changes
//! where a field comes from without touching the crawler.

use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// The product fields read from a product page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Upc,
    Title,
    PriceExcludingTax,
    PriceIncludingTax,
    Stock,
    Description,
    Rating,
    Category,
    Image,
}

impl Field {
    /// Every field, in the order the rules are stored
    pub const ALL: [Field; 9] = [
        Field::Upc,
        Field::Title,
        Field::PriceExcludingTax,
        Field::PriceIncludingTax,
        Field::Stock,
        Field::Description,
        Field::Rating,
        Field::Category,
        Field::Image,
    ];

    /// Returns the field name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upc => "upc",
            Self::Title => "title",
            Self::PriceExcludingTax => "price_excluding_tax",
            Self::PriceIncludingTax => "price_including_tax",
            Self::Stock => "number_available",
            Self::Description => "product_description",
            Self::Rating => "review_rating",
            Self::Category => "category",
            Self::Image => "image_url",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a CSS selector, reporting failures as `HarvestError::Selector`
pub(crate) fn parse_selector(css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css).map_err(|e| HarvestError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// A CSS selector and the index of the match that holds a field
#[derive(Debug, Clone)]
pub struct SelectorRule {
    css: String,
    index: usize,
    selector: Selector,
}

impl SelectorRule {
    /// Creates a rule reading the `index`-th (zero-based) match of `css`
    pub fn new(css: &str, index: usize) -> Result<Self, HarvestError> {
        Ok(Self {
            css: css.to_string(),
            index,
            selector: parse_selector(css)?,
        })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the matched element, or an extraction error naming `field`
    pub fn element<'a>(
        &self,
        field: Field,
        document: &'a Html,
    ) -> Result<ElementRef<'a>, HarvestError> {
        document
            .select(&self.selector)
            .nth(self.index)
            .ok_or_else(|| self.missing(field, format!("no element at index {}", self.index)))
    }

    /// Returns the concatenated text of the matched element
    pub fn text(&self, field: Field, document: &Html) -> Result<String, HarvestError> {
        Ok(self.element(field, document)?.text().collect())
    }

    /// Returns an attribute of the matched element
    pub fn attr(&self, field: Field, document: &Html, name: &str) -> Result<String, HarvestError> {
        self.element(field, document)?
            .value()
            .attr(name)
            .map(str::to_string)
            .ok_or_else(|| self.missing(field, format!("missing attribute '{}'", name)))
    }

    /// Returns the `position`-th (zero-based) token of the matched element's `class` attribute
    pub fn class_token(
        &self,
        field: Field,
        document: &Html,
        position: usize,
    ) -> Result<String, HarvestError> {
        let class = self.attr(field, document, "class")?;
        class
            .split_whitespace()
            .nth(position)
            .map(str::to_string)
            .ok_or_else(|| self.missing(field, format!("no class token at position {}", position)))
    }

    fn missing(&self, field: Field, detail: String) -> HarvestError {
        HarvestError::Extraction {
            field: field.name(),
            selector: self.css.clone(),
            detail,
        }
    }
}

/// Maps every `Field` to the rule that locates it
#[derive(Debug, Clone)]
pub struct ExtractionMap {
    rules: Vec<SelectorRule>,
}

impl ExtractionMap {
    /// Returns the rules matching the books.toscrape.com product page layout
    pub fn standard() -> Result<Self, HarvestError> {
        let rules = Field::ALL
            .iter()
            .map(|field| {
                let (css, index) = standard_rule(*field);
                SelectorRule::new(css, index)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Returns the rule for `field`
    pub fn rule(&self, field: Field) -> &SelectorRule {
        &self.rules[field.slot()]
    }

    /// Replaces the rule for `field`
    pub fn with_rule(mut self, field: Field, rule: SelectorRule) -> Self {
        self.rules[field.slot()] = rule;
        self
    }
}

fn standard_rule(field: Field) -> (&'static str, usize) {
    match field {
        Field::Upc => ("td", 0),
        Field::Title => ("h1", 0),
        Field::PriceExcludingTax => ("td", 2),
        Field::PriceIncludingTax => ("td", 3),
        Field::Stock => ("td", 5),
        Field::Description => ("p", 3),
        Field::Rating => ("p", 2),
        Field::Category => (".breadcrumb > li", 2),
        Field::Image => ("img", 0),
    }
}
