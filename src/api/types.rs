//! Request and response types mirroring the Firecrawl v1 JSON schema
//!
//! Field names follow the wire format (camelCase). Optional request fields are
//! left out of the body when unset so the service applies its own defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Output representation requested from a scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Format {
    Markdown,
    Html,
    RawHtml,
    Screenshot,
    #[serde(rename = "screenshot@fullPage")]
    ScreenshotFullPage,
    Links,
}

/// Options for a single-page scrape, also nested inside crawl options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,

    /// Strip navigation, footers and similar boilerplate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,

    /// Extra headers the service sends to the target site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Milliseconds to wait for the page before capturing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u32>,

    /// Service-side timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Options for a crawl job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,

    /// Maximum number of pages to crawl
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_backward_links: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
}

/// Options for a site map query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// Only return links related to this term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A meta tag value; pages with duplicate tags report a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    One(String),
    Many(Vec<String>),
}

impl MetaValue {
    /// The first value, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

/// Page metadata reported by the service
///
/// Keys without a dedicated field (og tags, custom meta) are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<MetaValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<MetaValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<MetaValue>,

    #[serde(rename = "sourceURL", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A scraped page in every format that was requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,

    /// Screenshot URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Handle returned when a crawl job is submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlJob {
    pub id: String,

    /// Status URL of the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Lifecycle state of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    // ===== In-Progress States =====
    Pending,
    Queued,
    Waiting,
    Active,
    Paused,
    Scraping,

    // ===== Terminal States =====
    Completed,
    Failed,
    Cancelled,

    /// Any status this client does not recognize
    #[serde(other)]
    Unknown,
}

impl CrawlStatus {
    /// Returns true while the job may still produce pages
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Queued | Self::Waiting | Self::Active | Self::Paused | Self::Scraping
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Queued => "queued",
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Scraping => "scraping",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress and results of a crawl job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatusResponse {
    pub status: CrawlStatus,

    /// Pages discovered so far
    #[serde(default)]
    pub total: u32,

    /// Pages scraped so far
    #[serde(default)]
    pub completed: u32,

    #[serde(default)]
    pub credits_used: u32,

    /// When the service discards the job and its results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// URL of the next page of results when the data is paginated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(default)]
    pub data: Vec<Document>,
}

impl CrawlStatusResponse {
    /// Creates an empty response in the given state
    pub fn new(status: CrawlStatus) -> Self {
        Self {
            status,
            total: 0,
            completed: 0,
            credits_used: 0,
            expires_at: None,
            next: None,
            data: Vec::new(),
        }
    }
}

/// URLs discovered by a site map query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapResponse {
    #[serde(default)]
    pub links: Vec<String>,
}

/// Acknowledgement of a cancelled crawl job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelResponse {
    pub status: CrawlStatus,
}
