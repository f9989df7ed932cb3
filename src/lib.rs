//! Firecrawl demo: a guided tour of a hosted scraping API
//!
//! This crate drives a fixed workflow against the Firecrawl v1 REST API:
//! a scrape, a blocking crawl, a submitted crawl with bounded polling, and a
//! site map query. Results are written as text and pretty-printed JSON.

pub mod api;
pub mod config;
pub mod driver;
pub mod output;

use thiserror::Error;

/// Main error type for a demo run
///
/// Configuration and client construction fail before the run starts and
/// are reported by the binary with their own context.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to {step}: {source}")]
    Step {
        step: driver::Step,
        #[source]
        source: api::ApiError,
    },

    #[error("Failed to serialize {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// Returns the workflow step that failed, if the error came from one
    pub fn step(&self) -> Option<driver::Step> {
        match self {
            Self::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for demo operations
pub type Result<T> = std::result::Result<T, DemoError>;

// Re-export commonly used types
pub use api::{CrawlApi, FirecrawlClient};
pub use config::Config;
pub use driver::{run_demo, PollOutcome, Step};
