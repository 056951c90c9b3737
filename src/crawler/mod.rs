//! The crawl engine
//!
//! Coordinator, worker pool, page fetcher, link extractor, and sitemap
//! seeder. `crawl` is the entry point consumed by the CLI and by library
//! callers.

mod coordinator;
mod fetcher;
mod parser;
mod sitemap;

pub use coordinator::{Coordinator, CrawlOutcome, CrawlReport, OnUrlFound};
pub use fetcher::{build_http_client, fetch_and_extract};
pub use parser::extract_links;
pub use sitemap::seed_from_sitemap;

use crate::config::CrawlConfig;
use crate::CrawlError;

/// Discovers every reachable page on the seed URL's origin
///
/// Seeds the frontier from the sitemap (when one exists) and the seed URL,
/// then follows same-origin links across a fixed worker pool until the
/// frontier drains or the configured timeout fires. The report's URL list is
/// sorted case-insensitively and contains each page exactly once.
///
/// `on_url_found` fires once per normalized key, in discovery order, with the
/// original spelling of the URL.
///
/// Fails only on an unparseable seed URL or an unbuildable HTTP client;
/// every other condition degrades to a partial result.
pub async fn crawl(
    seed_url: &str,
    config: &CrawlConfig,
    on_url_found: Option<OnUrlFound>,
) -> Result<CrawlReport, CrawlError> {
    Coordinator::new(seed_url, config.clone(), on_url_found)?
        .run()
        .await
}
