use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// Environment variable holding the base URL
pub const API_URL_ENV: &str = "FIRECRAWL_API_URL";

/// Loads, overrides and validates the configuration
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file. Without one the
///   built-in defaults are used.
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use firecrawl_demo::config::load_config;
///
/// let config = load_config(Some(Path::new("demo.toml"))).unwrap();
/// println!("Base URL: {}", config.api.base_url);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_config(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate(&config)?;

    Ok(config)
}

/// Parses TOML content without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

/// Overrides the API credentials from the environment
///
/// `lookup` is consulted for [`API_KEY_ENV`] and [`API_URL_ENV`]; empty values
/// are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("Using API key from {}", API_KEY_ENV);
        config.api.api_key = key;
    }

    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("Using base URL from {}: {}", API_URL_ENV, url);
        config.api.base_url = url;
    }
}
