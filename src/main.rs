//! Linkmap command-line interface
//!
//! Crawls a single origin and writes the discovered URL list as a plain-text
//! list, an XML sitemap, and a JSON document.

use anyhow::Context;
use clap::Parser;
use linkmap::config::{load_config, validate, CrawlConfig};
use linkmap::crawler::{crawl, CrawlOutcome, OnUrlFound};
use linkmap::output::{write_sitemap_json, write_sitemap_xml, write_url_list};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkmap: map every reachable page on a web origin
#[derive(Parser, Debug)]
#[command(name = "linkmap")]
#[command(version)]
#[command(about = "Discover every reachable page on a single web origin", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent workers (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Overall timeout in seconds (overrides config)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Only seed from the sitemap; skip link-following entirely
    #[arg(long)]
    sitemap_only: bool,

    /// Directory to write artifacts into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Increase logging verbosity (-v, -vv)
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

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CrawlConfig::default(),
    };

    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.sitemap_only {
        config.sitemap_only = true;
    }
    validate(&config)?;

    tracing::info!(
        "crawling {} with {} workers, {}s timeout",
        cli.url,
        config.workers,
        config.timeout_secs
    );

    let on_url_found: OnUrlFound = Box::new(|url| {
        tracing::info!("found URL: {}", url);
    });

    let report = crawl(&cli.url, &config, Some(on_url_found)).await?;

    match report.outcome {
        CrawlOutcome::Completed => {
            tracing::info!("discovered {} URLs", report.urls.len())
        }
        CrawlOutcome::TimedOut => tracing::warn!(
            "timed out; discovered {} URLs before the deadline",
            report.urls.len()
        ),
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    write_url_list(&report.urls, &cli.output_dir.join("scraped_urls.txt"))?;
    write_sitemap_xml(&report.urls, &cli.output_dir.join("sitemap.xml"))?;
    write_sitemap_json(&report.urls, &cli.output_dir.join("sitemap.json"))?;

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkmap=info,warn"),
            1 => EnvFilter::new("linkmap=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
