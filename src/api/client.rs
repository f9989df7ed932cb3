//! HTTP client for the Firecrawl v1 API
//!
//! This module handles all HTTP requests made by the demo, including:
//! - Building the `reqwest` client with timeouts and a user agent
//! - Bearer authentication and the idempotency header
//! - Mapping non-2xx answers and `success: false` envelopes to errors
//! - Waiting on crawl jobs and following paginated results

use crate::api::traits::{ApiError, ApiResult, CrawlApi};
use crate::api::types::{
    CancelResponse, CrawlJob, CrawlOptions, CrawlStatusResponse, Document, MapOptions,
    MapResponse, ScrapeOptions,
};
use crate::config::{ApiConfig, MIN_CRAWL_POLL_INTERVAL_MS};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Shortest delay a blocking crawl waits between status checks
pub const MIN_CRAWL_POLL_INTERVAL: Duration = Duration::from_millis(MIN_CRAWL_POLL_INTERVAL_MS);

/// Header carrying the client-generated idempotency key
pub const IDEMPOTENCY_HEADER: &str = "x-idempotency-key";

const ACTION_SCRAPE: &str = "scrape URL";
const ACTION_START_CRAWL: &str = "start crawl job";
const ACTION_CHECK_STATUS: &str = "check crawl status";
const ACTION_NEXT_PAGE: &str = "fetch next crawl page";
const ACTION_CANCEL: &str = "cancel crawl job";
const ACTION_MAP: &str = "map URL";

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The API configuration (only the timeout is used here)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for a Firecrawl-compatible service
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    http: Client,
    base_url: Url,
    api_key: String,
    poll_interval: Duration,
}

#[derive(Serialize)]
struct UrlRequest<'a, O: Serialize> {
    url: &'a str,
    #[serde(flatten)]
    options: &'a O,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    data: Document,
}

impl FirecrawlClient {
    /// Creates a client from the API section of the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use firecrawl_demo::api::FirecrawlClient;
    /// use firecrawl_demo::config::ApiConfig;
    ///
    /// let config = ApiConfig {
    ///     api_key: "fc-...".to_string(),
    ///     ..Default::default()
    /// };
    /// let client = FirecrawlClient::from_config(&config).unwrap();
    /// ```
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let http = build_http_client(config).map_err(ApiError::Build)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.base_url)?,
            api_key: config.api_key.clone(),
            poll_interval: Duration::from_millis(config.crawl_poll_interval_ms)
                .max(MIN_CRAWL_POLL_INTERVAL),
        })
    }

    /// Creates a client with default timeouts
    pub fn new(api_key: impl Into<String>, base_url: &str) -> ApiResult<Self> {
        let config = ApiConfig {
            api_key: api_key.into(),
            base_url: base_url.to_string(),
            ..Default::default()
        };
        Self::from_config(&config)
    }

    /// Sets how long a blocking crawl sleeps between status checks
    ///
    /// Values below [`MIN_CRAWL_POLL_INTERVAL`] are raised to it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_CRAWL_POLL_INTERVAL);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
        action: &'static str,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(self.endpoint(path)?).json(body);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }
        self.send(request, action).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &'static str,
    ) -> ApiResult<T> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|source| ApiError::Http { action, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Http { action, source })?;

        tracing::debug!("{} -> HTTP {} ({} bytes)", action, status.as_u16(), body.len());

        if !status.is_success() {
            return Err(ApiError::from_status(
                status.as_u16(),
                action,
                error_message(&body),
            ));
        }

        decode_body(&body, action)
    }

    /// Waits for a submitted job to finish and gathers every page of results
    async fn monitor_job(&self, id: &str) -> ApiResult<CrawlStatusResponse> {
        loop {
            let status = self.check_crawl_status(id).await?;

            if status.status.is_completed() {
                return self.collect_pages(status).await;
            }

            if !status.status.is_in_progress() {
                return Err(ApiError::JobFailed {
                    id: id.to_string(),
                    status: status.status,
                });
            }

            tracing::debug!(
                "Crawl job {} is {} ({}/{} pages)",
                id,
                status.status,
                status.completed,
                status.total
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Follows `next` links until the whole result set is in `data`
    ///
    /// Only links on the base URL's origin are followed, since each request
    /// carries the API key. A link seen before ends the walk.
    async fn collect_pages(&self, mut status: CrawlStatusResponse) -> ApiResult<CrawlStatusResponse> {
        let mut visited = HashSet::new();

        while let Some(next) = status.next.take().filter(|n| !n.is_empty()) {
            let url = Url::parse(&next)?;

            if url.origin() != self.base_url.origin() {
                return Err(ApiError::ForeignNextPage {
                    url: url.to_string(),
                });
            }

            if !visited.insert(url.clone()) {
                tracing::warn!("Crawl results link back to {}; stopping pagination", url);
                break;
            }

            tracing::debug!("Fetching next page of crawl results: {}", url);

            let page: CrawlStatusResponse = self.send(self.http.get(url), ACTION_NEXT_PAGE).await?;
            status.data.extend(page.data);
            status.next = page.next;
        }

        Ok(status)
    }
}

impl CrawlApi for FirecrawlClient {
    async fn scrape_url(&self, url: &str, options: Option<&ScrapeOptions>) -> ApiResult<Document> {
        let default_options = ScrapeOptions::default();
        let body = UrlRequest {
            url,
            options: options.unwrap_or(&default_options),
        };

        let response: ScrapeResponse = self
            .post_json("v1/scrape", &body, None, ACTION_SCRAPE)
            .await?;
        Ok(response.data)
    }

    async fn crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
    ) -> ApiResult<CrawlStatusResponse> {
        let job = self.async_crawl_url(url, options, idempotency_key).await?;
        tracing::debug!("Waiting for crawl job {}", job.id);
        self.monitor_job(&job.id).await
    }

    async fn async_crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
    ) -> ApiResult<CrawlJob> {
        let default_options = CrawlOptions::default();
        let body = UrlRequest {
            url,
            options: options.unwrap_or(&default_options),
        };

        self.post_json("v1/crawl", &body, idempotency_key, ACTION_START_CRAWL)
            .await
    }

    async fn check_crawl_status(&self, id: &str) -> ApiResult<CrawlStatusResponse> {
        let url = self.endpoint(&format!("v1/crawl/{}", id))?;
        self.send(self.http.get(url), ACTION_CHECK_STATUS).await
    }

    async fn cancel_crawl(&self, id: &str) -> ApiResult<CancelResponse> {
        let url = self.endpoint(&format!("v1/crawl/{}", id))?;
        self.send(self.http.delete(url), ACTION_CANCEL).await
    }

    async fn map_url(&self, url: &str, options: Option<&MapOptions>) -> ApiResult<MapResponse> {
        let default_options = MapOptions::default();
        let body = UrlRequest {
            url,
            options: options.unwrap_or(&default_options),
        };

        self.post_json("v1/map", &body, None, ACTION_MAP).await
    }
}

/// Parses the base URL so that relative endpoint joins keep its path
fn normalize_base_url(base_url: &str) -> ApiResult<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Extracts the service's `error` field, falling back to the raw body
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "no error message provided".to_string(),
        None => body.trim().to_string(),
    }
}

/// Decodes a 2xx body, rejecting envelopes that carry `success: false`
fn decode_body<T: DeserializeOwned>(body: &str, action: &'static str) -> ApiResult<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|source| ApiError::Decode { action, source })?;

    if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
        return Err(ApiError::Unsuccessful {
            action,
            message: error_message(body),
        });
    }

    serde_json::from_value(value).map_err(|source| ApiError::Decode { action, source })
}
