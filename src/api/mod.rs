//! Client for the hosted scraping API
//!
//! This module contains everything needed to talk to the service:
//! - Typed request options and response documents
//! - The `CrawlApi` trait the driver is written against
//! - `FirecrawlClient`, the `reqwest` implementation

mod client;
mod traits;
mod types;

pub use client::{build_http_client, FirecrawlClient, IDEMPOTENCY_HEADER, MIN_CRAWL_POLL_INTERVAL};
pub use traits::{ApiError, ApiResult, CrawlApi};
pub use types::{
    CancelResponse, CrawlJob, CrawlOptions, CrawlStatus, CrawlStatusResponse, Document, Format,
    MapOptions, MapResponse, MetaValue, Metadata, ScrapeOptions,
};
