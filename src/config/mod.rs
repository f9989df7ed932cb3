//! Configuration module for the Firecrawl demo
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, with API credentials overridable from the environment.
//!
//! # Example
//!
//! ```no_run
//! use firecrawl_demo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("demo.toml"))).unwrap();
//! println!("Polling up to {} times", config.polling.max_checks);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, CrawlTarget, MapTarget, PollingConfig, ScrapeTarget, DEFAULT_BASE_URL,
    PLACEHOLDER_API_KEY,
};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, parse_config, API_KEY_ENV, API_URL_ENV};
pub use validation::{validate, MIN_CRAWL_POLL_INTERVAL_MS};
