/// Column names of every category CSV, in row order
pub const CSV_HEADER: [&str; 10] = [
    "product_page_url",
    "universal_product_code (upc)",
    "title",
    "price_including_tax",
    "price_excluding_tax",
    "number_available",
    "product_description",
    "category",
    "review_rating",
    "image_url",
];

/// All fields extracted from a single product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// URL the product page was fetched from
    pub source_url: String,

    /// Universal product code
    pub upc: String,

    pub title: String,

    /// Decimal string, currency symbol removed
    pub price_including_tax: String,

    /// Decimal string, currency symbol removed
    pub price_excluding_tax: String,

    /// Units in stock
    pub stock_count: u32,

    pub description: String,

    /// Category name as printed in the product breadcrumb
    pub category_name: String,

    /// Star rating in `1..=5`
    pub rating: u8,

    /// Absolute URL of the cover image
    pub image_url: String,
}

impl ProductRecord {
    /// Returns the record as CSV fields, matching `CSV_HEADER`
    pub fn csv_row(&self) -> [String; 10] {
        [
            self.source_url.clone(),
            self.upc.clone(),
            self.title.clone(),
            self.price_including_tax.clone(),
            self.price_excluding_tax.clone(),
            self.stock_count.to_string(),
            self.description.clone(),
            self.category_name.clone(),
            self.rating.to_string(),
            self.image_url.clone(),
        ]
    }
}
