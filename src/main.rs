//! Firecrawl demo entry point
//!
//! Runs the demonstration workflow against a Firecrawl-compatible service.

use anyhow::Context;
use clap::Parser;
use firecrawl_demo::config::load_config;
use firecrawl_demo::{run_demo, FirecrawlClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Firecrawl demo: scrape, crawl, poll and map through the hosted API
///
/// Credentials come from the optional TOML file or from the
/// FIRECRAWL_API_KEY and FIRECRAWL_API_URL environment variables.
#[derive(Parser, Debug)]
#[command(name = "firecrawl-demo")]
#[command(version)]
#[command(about = "A guided tour of the Firecrawl API", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{:#}", e);
            Err(e)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let client = FirecrawlClient::from_config(&config.api).context("Failed to create client")?;
    tracing::info!("Using API at {}", client.base_url());

    let mut stdout = std::io::stdout().lock();
    let report = run_demo(&client, &config, &mut stdout).await?;

    tracing::info!(
        "Demo finished: job {} {} after {} checks, {} mapped links",
        report.job_id,
        if report.poll_outcome.is_completed() {
            "completed"
        } else {
            "still pending"
        },
        report.poll_checks,
        report.mapped_links
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the demo output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("firecrawl_demo=info,warn"),
            1 => EnvFilter::new("firecrawl_demo=debug,info"),
            2 => EnvFilter::new("firecrawl_demo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
