//! Linkmap: single-origin URL discovery
//!
//! This crate discovers every reachable page on one web origin by combining
//! sitemap-assisted seeding with recursive link-following, fanned out across a
//! fixed pool of concurrent workers.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl run
///
/// Only these conditions abort a run. Everything else (an unreachable sitemap,
/// a failed page fetch, a link that will not parse) degrades gracefully and
/// the run still produces its best-effort discovered set.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// URL normalization errors
///
/// Non-fatal at the run level: a URL that fails to normalize is dropped from
/// consideration and the crawl continues.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("failed to parse URL: {0}")]
    Parse(String),

    #[error("unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("missing host in URL")]
    MissingHost,
}

/// Fetch errors reported by workers
///
/// A failed fetch contributes zero links and is logged; it never aborts the
/// run and is never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },
}

/// Artifact writer errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, CrawlOutcome, CrawlReport, OnUrlFound};
pub use url::{normalize_url, Origin};
