//! Driver for the demonstration workflow
//!
//! This module sequences the calls against the API client:
//! - A blocking scrape and a blocking crawl
//! - A submitted crawl followed by bounded status polling
//! - A site map query

mod polling;
mod workflow;

pub use polling::{poll_crawl_job, PollOutcome, PollPolicy, PollReport};
pub use workflow::{
    async_crawl_options, crawl_options, map_options, new_idempotency_key, run_demo, DemoReport,
};

use std::fmt;

/// A step of the workflow, used to name the failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Scrape,
    Crawl,
    AsyncCrawl,
    CheckStatus,
    Cancel,
    Map,
}

impl Step {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Scrape => "scrape URL",
            Self::Crawl => "crawl URL",
            Self::AsyncCrawl => "async crawl URL",
            Self::CheckStatus => "check crawl status",
            Self::Cancel => "cancel crawl job",
            Self::Map => "map URL",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
