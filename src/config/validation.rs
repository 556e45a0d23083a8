use crate::config::types::{
    Config, HarvestConfig, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_harvest_config(&config.harvest)?;
    Ok(())
}

/// Validates storefront URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("root_url", &config.root_url)?;

    if let Some(catalogue) = &config.catalogue_url {
        validate_http_url("catalogue_url", catalogue)?;
    }

    if let Some(origin) = &config.image_origin {
        validate_http_url("image_origin", origin)?;
    }

    Ok(())
}

/// Validates an absolute HTTP(S) URL
fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use the http or https scheme",
            name, value
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data_root cannot be empty".to_string(),
        ));
    }

    if config.title_max_chars < 1 {
        return Err(ConfigError::Validation(
            "title_max_chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.categories.iter().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "category filter entries cannot be blank".to_string(),
        ));
    }

    Ok(())
}
