//! HTML link extraction
//!
//! Collects every anchor `href` from a page body and resolves it to an
//! absolute URL. Hrefs carrying a fragment marker are discarded before
//! resolution; non-navigational schemes are skipped.

use crate::url::Origin;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all anchor hrefs from an HTML document, resolved to absolute URLs
///
/// Resolution rules:
/// - absolute (begins with an HTTP(S) scheme) → used as-is
/// - root-relative (begins with `/`) → origin + path
/// - otherwise → resolved relative to the page's own URL
///
/// No origin filtering happens here; the returned list may contain external
/// URLs, which the coordinator rejects during acceptance.
pub fn extract_links(html: &str, page_url: &Url, origin: &Origin) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_href(href, page_url, origin) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves one href to an absolute URL string
///
/// Returns None for hrefs that should not be followed: empty, fragment-bearing,
/// or non-navigational schemes.
fn resolve_href(href: &str, page_url: &Url, origin: &Origin) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.contains('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else if href.starts_with('/') {
        Some(format!("{}{}", origin.as_str(), href))
    } else {
        page_url.join(href).ok().map(|u| u.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Origin {
        Origin::parse("https://example.com").unwrap()
    }

    fn page_url() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    #[test]
    fn test_absolute_href_used_as_is() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let links = extract_links(html, &page_url(), &origin());
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_root_relative_joined_to_origin() {
        let html = r#"<html><body><a href="/about">About</a></body></html>"#;
        let links = extract_links(html, &page_url(), &origin());
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_relative_resolved_against_page() {
        let html = r#"<html><body><a href="sibling">Link</a></body></html>"#;
        let links = extract_links(html, &page_url(), &origin());
        assert_eq!(links, vec!["https://example.com/dir/sibling"]);
    }

    #[test]
    fn test_fragment_hrefs_discarded() {
        let html = r##"<html><body>
            <a href="#top">Top</a>
            <a href="/page#section">Section</a>
        </body></html>"##;
        let links = extract_links(html, &page_url(), &origin());
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_non_navigational_schemes() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:a@example.com">Mail</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,hi">Data</a>
        </body></html>"#;
        let links = extract_links(html, &page_url(), &origin());
        assert!(links.is_empty());
    }

    #[test]
    fn test_external_links_are_kept_here() {
        // Scope filtering belongs to the coordinator, not the extractor
        let html = r#"<html><body><a href="http://elsewhere.net/">Out</a></body></html>"#;
        let links = extract_links(html, &page_url(), &origin());
        assert_eq!(links, vec!["http://elsewhere.net/"]);
    }

    #[test]
    fn test_mixed_links() {
        let html = r##"<html><body>
            <a href="/a">A</a>
            <a href="b">B</a>
            <a href="https://example.com/c">C</a>
            <a href="#skip">Skip</a>
            <a href="">Empty</a>
        </body></html>"##;
        let links = extract_links(html, &page_url(), &origin());
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/dir/b",
                "https://example.com/c",
            ]
        );
    }
}
