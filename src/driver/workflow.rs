//! The fixed demonstration workflow
//!
//! Steps run strictly in order and the first failure ends the run, so a step
//! never executes after an earlier one has failed.

use crate::api::{CrawlApi, CrawlOptions, MapOptions, ScrapeOptions};
use crate::config::{Config, CrawlTarget, MapTarget};
use crate::driver::polling::{poll_crawl_job, PollOutcome, PollPolicy};
use crate::driver::Step;
use crate::output::write_json;
use crate::{DemoError, Result};
use std::io::Write;
use uuid::Uuid;

/// Summary of a completed demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Key sent with the blocking crawl
    pub idempotency_key: String,

    /// Handle of the submitted crawl
    pub job_id: String,

    /// Outcome of polling the submitted crawl
    pub poll_outcome: PollOutcome,

    /// Status checks made before the final query
    pub poll_checks: u32,

    /// Whether the submitted crawl was cancelled after polling gave up
    pub cancelled: bool,

    /// Number of links returned by the map query
    pub mapped_links: usize,
}

/// Generates a fresh idempotency key (UUID v4)
pub fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Options for the blocking crawl
pub fn crawl_options(target: &CrawlTarget) -> CrawlOptions {
    CrawlOptions {
        exclude_paths: Some(target.exclude_paths.clone()),
        max_depth: Some(target.max_depth),
        ..Default::default()
    }
}

/// Options for the submitted crawl: the blocking options plus output formats
pub fn async_crawl_options(target: &CrawlTarget) -> CrawlOptions {
    CrawlOptions {
        scrape_options: Some(ScrapeOptions {
            formats: Some(target.async_formats.clone()),
            ..Default::default()
        }),
        ..crawl_options(target)
    }
}

pub fn map_options(target: &MapTarget) -> MapOptions {
    MapOptions {
        search: target.search.clone(),
        ..Default::default()
    }
}

fn step_failed(step: Step) -> impl FnOnce(crate::api::ApiError) -> DemoError {
    move |source| DemoError::Step { step, source }
}

/// Runs the whole workflow, writing results to `out`
///
/// # Steps
///
/// 1. Scrape `config.scrape.url` with default options and print its markdown
/// 2. Crawl `config.crawl.url` with a fresh idempotency key and print the result
/// 3. Submit the same crawl asynchronously, poll it, and print the final status
/// 4. Map `config.map.url` filtered by the search term and print the links
///
/// # Returns
///
/// * `Ok(DemoReport)` - Every step ran
/// * `Err(DemoError)` - The first failure; later steps were not attempted
pub async fn run_demo<C, W>(client: &C, config: &Config, out: &mut W) -> Result<DemoReport>
where
    C: CrawlApi,
    W: Write,
{
    // ===== Scrape =====
    tracing::info!("Scraping {}", config.scrape.url);
    let document = client
        .scrape_url(&config.scrape.url, None)
        .await
        .map_err(step_failed(Step::Scrape))?;
    writeln!(out, "{}", document.markdown.as_deref().unwrap_or_default())?;

    // ===== Blocking crawl =====
    let idempotency_key = new_idempotency_key();
    tracing::info!(
        "Crawling {} (idempotency key {})",
        config.crawl.url,
        idempotency_key
    );
    let crawl_result = client
        .crawl_url(
            &config.crawl.url,
            Some(&crawl_options(&config.crawl)),
            Some(&idempotency_key),
        )
        .await
        .map_err(step_failed(Step::Crawl))?;
    tracing::info!("Crawl finished with {} pages", crawl_result.data.len());
    write_json(out, &crawl_result, "crawl result")?;

    // ===== Submitted crawl with polling =====
    tracing::info!("Submitting crawl of {}", config.crawl.url);
    let job = client
        .async_crawl_url(
            &config.crawl.url,
            Some(&async_crawl_options(&config.crawl)),
            None,
        )
        .await
        .map_err(step_failed(Step::AsyncCrawl))?;
    tracing::info!("Crawl job submitted: {}", job.id);

    let policy = PollPolicy::from(&config.polling);
    let report = poll_crawl_job(client, &job.id, &policy)
        .await
        .map_err(step_failed(Step::CheckStatus))?;

    let mut cancelled = false;
    match &report.outcome {
        PollOutcome::Completed(status) => {
            tracing::info!(
                "Crawl job {} completed after {} checks ({} pages)",
                job.id,
                report.checks,
                status.data.len()
            );
        }
        PollOutcome::StillPending(status) => {
            tracing::warn!(
                "Crawl job {} still {} after {} checks; printing partial status",
                job.id,
                status.status,
                report.checks
            );
        }
    }
    write_json(out, report.outcome.status(), "async crawl result")?;

    if !report.outcome.is_completed() && config.polling.cancel_on_exhaustion {
        let response = client
            .cancel_crawl(&job.id)
            .await
            .map_err(step_failed(Step::Cancel))?;
        tracing::info!("Crawl job {} cancelled (status: {})", job.id, response.status);
        cancelled = true;
    }

    // ===== Map =====
    tracing::info!("Mapping {}", config.map.url);
    let map_result = client
        .map_url(&config.map.url, Some(&map_options(&config.map)))
        .await
        .map_err(step_failed(Step::Map))?;
    tracing::info!("Map returned {} links", map_result.links.len());
    write_json(out, &map_result, "map result")?;

    Ok(DemoReport {
        idempotency_key,
        job_id: job.id,
        poll_outcome: report.outcome,
        poll_checks: report.checks,
        cancelled,
        mapped_links: map_result.links.len(),
    })
}
