use crate::extract::{IMAGE_SRC_PREFIX_LEN, PRODUCT_HREF_PREFIX_LEN};
use serde::Deserialize;
use std::path::PathBuf;

/// Storefront that is harvested when no configuration file is given
pub const DEFAULT_ROOT_URL: &str = "https://books.toscrape.com/";

/// Main configuration structure for Shelf-Harvest
///
/// Every section is optional; a missing file or section falls back to the
/// defaults, which target the public books.toscrape.com storefront.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub harvest: HarvestConfig,
}

/// Storefront layout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root; category hrefs in the navigation are relative to it
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Base path product hrefs are rebased against (defaults to `<root>catalogue/`)
    #[serde(rename = "catalogue-url")]
    pub catalogue_url: Option<String>,

    /// Origin prepended to image sources (defaults to the root without its trailing slash)
    #[serde(rename = "image-origin")]
    pub image_origin: Option<String>,

    /// Characters dropped from the start of every product href
    #[serde(rename = "product-href-skip")]
    pub product_href_skip: usize,

    /// Characters dropped from the start of every image `src`
    #[serde(rename = "image-src-skip")]
    pub image_src_skip: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            catalogue_url: None,
            image_origin: None,
            product_href_skip: PRODUCT_HREF_PREFIX_LEN,
            image_src_skip: IMAGE_SRC_PREFIX_LEN,
        }
    }
}

impl SiteConfig {
    /// Returns the site root, always ending with `/`
    pub fn root_base(&self) -> String {
        with_trailing_slash(&self.root_url)
    }

    /// Returns the catalogue base, always ending with `/`
    pub fn catalogue_base(&self) -> String {
        match &self.catalogue_url {
            Some(url) => with_trailing_slash(url),
            None => format!("{}catalogue/", self.root_base()),
        }
    }

    /// Returns the image origin, never ending with `/`
    pub fn image_origin(&self) -> String {
        self.image_origin
            .as_deref()
            .unwrap_or(&self.root_url)
            .trim_end_matches('/')
            .to_string()
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ShelfHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the per-category CSV files and image folders
    #[serde(rename = "data-root")]
    pub data_root: PathBuf,

    /// Titles are truncated to this many characters before naming image files
    #[serde(rename = "title-max-chars")]
    pub title_max_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            title_max_chars: 100,
        }
    }
}

/// Harvest scope configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Category names to harvest (case-insensitive); empty means all
    pub categories: Vec<String>,

    /// Skip downloading product images
    #[serde(rename = "skip-images")]
    pub skip_images: bool,

    /// Upper bound on listing pages followed for one category
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            skip_images: false,
            max_pages: 1000,
        }
    }
}

impl HarvestConfig {
    /// Returns true if the named category passes the category filter
    pub fn includes(&self, category_name: &str) -> bool {
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|wanted| wanted.trim().eq_ignore_ascii_case(category_name.trim()))
    }
}
