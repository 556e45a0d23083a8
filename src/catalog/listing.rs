/// One category's product URLs, in pagination order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    /// Display name read from the category landing page
    pub category_name: String,

    /// URL of the category's first listing page
    pub category_url: String,

    /// Unique product URLs in discovery order
    pub product_urls: Vec<String>,
}

impl CategoryListing {
    pub fn new(category_name: String, category_url: String, product_urls: Vec<String>) -> Self {
        Self {
            category_name,
            category_url,
            product_urls,
        }
    }

    /// Returns the number of products in the listing
    pub fn len(&self) -> usize {
        self.product_urls.len()
    }

    /// Returns true if the category has no products
    pub fn is_empty(&self) -> bool {
        self.product_urls.is_empty()
    }
}
