//! Client trait and error types
//!
//! This module defines the trait interface for the remote scraping API and
//! the errors its implementations report.

use crate::api::types::{
    CancelResponse, CrawlJob, CrawlOptions, CrawlStatus, CrawlStatusResponse, Document, MapOptions,
    MapResponse, ScrapeOptions,
};
use thiserror::Error;

/// Errors that can occur while talking to the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("HTTP error while trying to {action}: {source}")]
    Http {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{reason} while trying to {action} (status {status}): {message}")]
    Status {
        status: u16,
        reason: String,
        action: &'static str,
        message: String,
    },

    #[error("Service reported failure while trying to {action}: {message}")]
    Unsuccessful {
        action: &'static str,
        message: String,
    },

    #[error("Malformed response while trying to {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Crawl job {id} failed or was stopped (status: {status})")]
    JobFailed { id: String, status: CrawlStatus },

    #[error("Refusing to follow crawl results to another origin: {url}")]
    ForeignNextPage { url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Builds a status error with wording that depends on the HTTP code
    pub fn from_status(status: u16, action: &'static str, message: impl Into<String>) -> Self {
        let reason = match status {
            402 => "Payment required".to_string(),
            408 => "Request timeout".to_string(),
            409 => "Conflict".to_string(),
            429 => "Rate limit exceeded".to_string(),
            500 => "Internal server error".to_string(),
            other => format!("Unexpected HTTP status {}", other),
        };

        Self::Status {
            status,
            reason,
            action,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code, if the service answered with one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Trait for scraping API implementations
///
/// The driver only talks to the service through this trait, so tests can
/// substitute a scripted fake for [`crate::api::FirecrawlClient`].
#[allow(async_fn_in_trait)]
pub trait CrawlApi {
    /// Scrapes a single page
    ///
    /// # Arguments
    ///
    /// * `url` - Page to scrape; bare domains are accepted
    /// * `options` - Formats and filters, or `None` for service defaults
    async fn scrape_url(&self, url: &str, options: Option<&ScrapeOptions>) -> ApiResult<Document>;

    /// Submits a crawl job and waits until it finishes
    ///
    /// # Arguments
    ///
    /// * `url` - Starting URL
    /// * `options` - Path filters, depth and nested scrape options
    /// * `idempotency_key` - Token letting the service drop duplicate submissions
    ///
    /// # Returns
    ///
    /// The completed job with every page collected
    async fn crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
    ) -> ApiResult<CrawlStatusResponse>;

    /// Submits a crawl job and returns its handle immediately
    async fn async_crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
    ) -> ApiResult<CrawlJob>;

    /// Queries the current state of a crawl job
    async fn check_crawl_status(&self, id: &str) -> ApiResult<CrawlStatusResponse>;

    /// Cancels a running crawl job
    async fn cancel_crawl(&self, id: &str) -> ApiResult<CancelResponse>;

    /// Lists the URLs the service knows for a site
    async fn map_url(&self, url: &str, options: Option<&MapOptions>) -> ApiResult<MapResponse>;
}
