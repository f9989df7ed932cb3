//! Bounded polling of a submitted crawl job
//!
//! The job goes `SUBMITTED -> POLLING -> (COMPLETED | EXHAUSTED)`. Each check
//! sleeps for the configured interval first, and a `completed` answer ends
//! the loop early. Whichever way the loop ends, one more status query is made
//! and its answer decides the [`PollOutcome`].

use crate::api::{ApiResult, CrawlApi, CrawlStatusResponse};
use crate::config::PollingConfig;
use std::time::Duration;

/// How often and how many times to check a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_checks: u32,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_checks: u32) -> Self {
        Self {
            interval,
            max_checks,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), 15)
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self::new(Duration::from_millis(config.interval_ms), config.max_checks)
    }
}

/// Result of the final status query after polling
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The job reported `completed`
    Completed(CrawlStatusResponse),

    /// The check budget ran out and the job had not completed
    StillPending(CrawlStatusResponse),
}

impl PollOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The last status received, whichever way polling ended
    pub fn status(&self) -> &CrawlStatusResponse {
        match self {
            Self::Completed(status) | Self::StillPending(status) => status,
        }
    }

    pub fn into_status(self) -> CrawlStatusResponse {
        match self {
            Self::Completed(status) | Self::StillPending(status) => status,
        }
    }
}

/// Outcome plus the number of checks made inside the loop
#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    pub outcome: PollOutcome,

    /// Sleep/query cycles before the final query
    pub checks: u32,
}

/// Polls `job_id` until it completes or the policy's budget is spent
///
/// # Arguments
///
/// * `client` - The API client
/// * `job_id` - Handle returned by the asynchronous submission
/// * `policy` - Interval and maximum number of checks
///
/// # Returns
///
/// * `Ok(PollReport)` - Outcome of the final status query
/// * `Err(ApiError)` - A status query failed; polling stops immediately
pub async fn poll_crawl_job<C: CrawlApi>(
    client: &C,
    job_id: &str,
    policy: &PollPolicy,
) -> ApiResult<PollReport> {
    let mut checks = 0;

    while checks < policy.max_checks {
        tokio::time::sleep(policy.interval).await;

        let response = client.check_crawl_status(job_id).await?;
        checks += 1;

        tracing::debug!(
            "Check {}/{} for job {}: {} ({}/{} pages)",
            checks,
            policy.max_checks,
            job_id,
            response.status,
            response.completed,
            response.total
        );

        if response.status.is_completed() {
            break;
        }
    }

    let final_status = client.check_crawl_status(job_id).await?;
    let outcome = if final_status.status.is_completed() {
        PollOutcome::Completed(final_status)
    } else {
        PollOutcome::StillPending(final_status)
    };

    Ok(PollReport { outcome, checks })
}
