use crate::api::Format;
use serde::Deserialize;

/// Default Firecrawl endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

/// Placeholder key shipped in sample configs; rejected by validation
pub const PLACEHOLDER_API_KEY: &str = "fc-YOUR_API_KEY";

/// Main configuration structure for the demo
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub scrape: ScrapeTarget,
    pub crawl: CrawlTarget,
    pub map: MapTarget,
}

/// Remote API connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bearer token sent with every request
    #[serde(rename = "api-key")]
    pub api_key: String,

    /// Root URL of the service (endpoints live under `v1/`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Delay between status checks while a blocking crawl waits (milliseconds)
    #[serde(rename = "crawl-poll-interval-ms")]
    pub crawl_poll_interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            crawl_poll_interval_ms: 2000,
        }
    }
}

/// Bounded polling of a submitted crawl job
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Sleep before each status check (milliseconds)
    #[serde(rename = "interval-ms")]
    pub interval_ms: u64,

    /// Maximum number of status checks before giving up
    #[serde(rename = "max-checks")]
    pub max_checks: u32,

    /// Cancel the remote job when polling gives up
    #[serde(rename = "cancel-on-exhaustion")]
    pub cancel_on_exhaustion: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            max_checks: 15,
            cancel_on_exhaustion: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeTarget {
    pub url: String,
}

impl Default for ScrapeTarget {
    fn default() -> Self {
        Self {
            url: "firecrawl.dev".to_string(),
        }
    }
}

/// Crawl targets shared by the blocking and the submitted crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlTarget {
    pub url: String,

    /// Path globs the crawler must skip
    #[serde(rename = "exclude-paths")]
    pub exclude_paths: Vec<String>,

    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Output formats requested for the submitted crawl
    #[serde(rename = "async-formats")]
    pub async_formats: Vec<Format>,
}

impl Default for CrawlTarget {
    fn default() -> Self {
        Self {
            url: "mendable.ai".to_string(),
            exclude_paths: vec!["blog/*".to_string()],
            max_depth: 2,
            async_formats: vec![
                Format::Markdown,
                Format::Html,
                Format::RawHtml,
                Format::Screenshot,
                Format::Links,
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapTarget {
    pub url: String,

    /// Search term narrowing the returned links
    pub search: Option<String>,
}

impl Default for MapTarget {
    fn default() -> Self {
        Self {
            url: "https://firecrawl.dev".to_string(),
            search: Some("blog".to_string()),
        }
    }
}
