use crate::config::types::{
    ApiConfig, Config, CrawlTarget, MapTarget, PollingConfig, ScrapeTarget, PLACEHOLDER_API_KEY,
};
use crate::ConfigError;
use url::Url;

/// Lowest accepted `crawl-poll-interval-ms`
pub const MIN_CRAWL_POLL_INTERVAL_MS: u64 = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_polling_config(&config.polling)?;
    validate_scrape_target(&config.scrape)?;
    validate_crawl_target(&config.crawl)?;
    validate_map_target(&config.map)?;
    Ok(())
}

/// Validates API credentials and endpoint
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let key = config.api_key.trim();

    if key.is_empty() {
        return Err(ConfigError::Validation(
            "api_key is missing; set it in the config file or FIRECRAWL_API_KEY".to_string(),
        ));
    }

    if key == PLACEHOLDER_API_KEY {
        return Err(ConfigError::Validation(format!(
            "api_key is still the placeholder '{}'",
            PLACEHOLDER_API_KEY
        )));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.crawl_poll_interval_ms < MIN_CRAWL_POLL_INTERVAL_MS {
        return Err(ConfigError::Validation(format!(
            "crawl_poll_interval_ms must be >= {}, got {}",
            MIN_CRAWL_POLL_INTERVAL_MS, config.crawl_poll_interval_ms
        )));
    }

    Ok(())
}

fn validate_polling_config(config: &PollingConfig) -> Result<(), ConfigError> {
    if config.max_checks < 1 {
        return Err(ConfigError::Validation(format!(
            "max_checks must be >= 1, got {}",
            config.max_checks
        )));
    }

    Ok(())
}

fn validate_scrape_target(config: &ScrapeTarget) -> Result<(), ConfigError> {
    // Bare domains are accepted by the service, so only emptiness is checked
    if config.url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "scrape url cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawl_target(config: &CrawlTarget) -> Result<(), ConfigError> {
    if config.url.trim().is_empty() {
        return Err(ConfigError::Validation("crawl url cannot be empty".to_string()));
    }

    if let Some(pattern) = config.exclude_paths.iter().find(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "exclude_paths contains an empty pattern: '{}'",
            pattern
        )));
    }

    if config.async_formats.is_empty() {
        return Err(ConfigError::Validation(
            "async_formats must list at least one format".to_string(),
        ));
    }

    Ok(())
}

fn validate_map_target(config: &MapTarget) -> Result<(), ConfigError> {
    Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid map url '{}': {}", config.url, e)))?;

    Ok(())
}
