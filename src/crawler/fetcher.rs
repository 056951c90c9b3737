//! HTTP fetching for the worker body
//!
//! One shared client per run; redirects are followed automatically up to a
//! bounded hop count. A non-usable status or transport failure surfaces as a
//! `FetchError` for logging, never for retry.

use crate::config::CrawlConfig;
use crate::crawler::parser::extract_links;
use crate::url::Origin;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Statuses treated as usable terminal results
///
/// Redirect statuses appear here for responses the client cannot follow
/// further (e.g. a redirect delivered at the hop limit) and for 304 replies,
/// which carry no body but are not failures.
const USABLE_STATUSES: &[u16] = &[200, 301, 302, 304, 307, 308];

const MAX_REDIRECTS: usize = 5;

/// Builds the HTTP client shared by all worker slots
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and extracts the hyperlinks it contains
///
/// Returns every resolved absolute URL found in the page's anchor elements.
/// Origin filtering is deliberately NOT done here; the coordinator gates
/// acceptance centrally, which keeps this component origin-agnostic and
/// independently testable.
pub async fn fetch_and_extract(
    client: &Client,
    url: &str,
    origin: &Origin,
) -> Result<Vec<String>, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status().as_u16();
    if !USABLE_STATUSES.contains(&status) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    // Resolve relative hrefs against the final URL, not the one we requested,
    // so pages behind redirects resolve correctly
    let final_url = response.url().clone();

    let body = response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })?;

    Ok(collect_links(&body, &final_url, origin))
}

fn collect_links(body: &str, page_url: &Url, origin: &Origin) -> Vec<String> {
    let links = extract_links(body, page_url, origin);
    tracing::debug!("found {} links on {}", links.len(), page_url);
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = CrawlConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_usable_statuses() {
        for status in [200, 301, 302, 304, 307, 308] {
            assert!(USABLE_STATUSES.contains(&status));
        }
        for status in [204, 400, 403, 404, 429, 500, 503] {
            assert!(!USABLE_STATUSES.contains(&status));
        }
    }
}
