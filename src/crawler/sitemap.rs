//! Sitemap-assisted seeding
//!
//! Attempts `GET {origin}/sitemap.xml` and parses a `<urlset>` of
//! `<url><loc>` entries into candidate URLs. A missing or unparseable sitemap
//! is never fatal; crawling proceeds via link-following alone.

use crate::url::{normalize_url, Origin};
use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::io::Cursor;

/// Fetches and parses the origin's sitemap into candidate URLs
///
/// Returns an empty list when the sitemap is unreachable, not XML, or not a
/// urlset. Surviving URLs are in-origin and fragment-free, but they still go
/// through the coordinator's normal acceptance path, so sitemap-sourced and
/// crawl-sourced URLs are indistinguishable once accepted.
pub async fn seed_from_sitemap(client: &Client, origin: &Origin) -> Vec<String> {
    let sitemap_url = origin.sitemap_url();
    tracing::info!("checking sitemap at {}", sitemap_url);

    let body = match client.get(&sitemap_url).send().await {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("failed to read sitemap body: {}", e);
                return Vec::new();
            }
        },
        Ok(response) => {
            tracing::debug!("sitemap request returned HTTP {}", response.status());
            return Vec::new();
        }
        Err(e) => {
            tracing::debug!("sitemap unavailable: {}", e);
            return Vec::new();
        }
    };

    let urls = parse_sitemap(&body, origin);
    tracing::info!("found {} URLs in sitemap", urls.len());
    urls
}

/// Parses sitemap XML, keeping only in-origin, fragment-free URL entries
///
/// Garbage input simply yields no entities.
pub(crate) fn parse_sitemap(xml: &[u8], origin: &Origin) -> Vec<String> {
    let mut urls = Vec::new();

    for entity in SiteMapReader::new(Cursor::new(xml)) {
        if let SiteMapEntity::Url(entry) = entity {
            if let Some(loc) = entry.loc.get_url() {
                let raw = loc.to_string();
                if raw.contains('#') {
                    continue;
                }
                match normalize_url(&raw) {
                    Ok(key) if origin.contains_key(&key) => urls.push(raw),
                    Ok(_) => tracing::debug!("sitemap URL outside origin: {}", raw),
                    Err(e) => tracing::debug!("sitemap URL rejected: {}: {}", raw, e),
                }
            }
        }
    }

    urls
}
