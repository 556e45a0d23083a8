//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning parsed HTML documents
//! - GET requests returning raw image bytes
//!
//! There is no retry: a transport failure or non-success status is returned
//! to the caller as a `FetchError`.

use crate::config::Config;
use crate::FetchError;
use reqwest::{Client, Response};
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The harvester configuration (user agent and timeout are read)
///
/// # Example
///
/// ```no_run
/// use shelf_harvest::config::Config;
/// use shelf_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests and hands back parsed pages or raw bodies
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher with a client built from the configuration
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = build_http_client(config).map_err(FetchError::Client)?;
        Ok(Self::new(client))
    }

    /// Fetches `url` and parses the body as an HTML document
    pub async fn fetch_document(&self, url: &str) -> Result<Html, FetchError> {
        let response = self.get(url).await?;
        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        Ok(Html::parse_document(&body))
    }

    /// Fetches `url` and returns the raw response body
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
