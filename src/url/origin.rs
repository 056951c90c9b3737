use crate::url::normalize_url;
use crate::UrlError;
use url::Url;

/// The scheme+host(+port) prefix that bounds a crawl
///
/// Every accepted URL must have a normalized key that starts with this
/// origin's normalized prefix. The original-case base string is kept for
/// resolving root-relative hrefs and for building the sitemap URL.
#[derive(Debug, Clone)]
pub struct Origin {
    base: String,
    key: String,
}

impl Origin {
    /// Derives the origin from a seed URL
    ///
    /// Fails if the seed is not a syntactically valid absolute HTTP(S) URL;
    /// this is the only URL error that is fatal to a run.
    pub fn parse(seed_url: &str) -> Result<Self, UrlError> {
        let url = Url::parse(seed_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?;

        let mut base = format!("{}://{}", url.scheme(), host);
        if let Some(port) = url.port() {
            base.push(':');
            base.push_str(&port.to_string());
        }

        // The base has no path component, so its normalized form is itself the
        // scope prefix
        let key = normalize_url(&base)?;

        Ok(Self { base, key })
    }

    /// The origin as a URL prefix without a trailing slash,
    /// e.g. `https://example.com`
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Whether a normalized key falls inside this origin's scope
    ///
    /// The prefix match stops at a path boundary, so `https://example.com`
    /// does not claim `https://example.community`.
    pub fn contains_key(&self, key: &str) -> bool {
        match key.strip_prefix(self.key.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// The conventional sitemap location for this origin
    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_from_seed_with_path() {
        let origin = Origin::parse("https://example.com/some/deep/page").unwrap();
        assert_eq!(origin.as_str(), "https://example.com");
    }

    #[test]
    fn test_origin_keeps_port() {
        let origin = Origin::parse("http://127.0.0.1:4545/").unwrap();
        assert_eq!(origin.as_str(), "http://127.0.0.1:4545");
        assert_eq!(origin.sitemap_url(), "http://127.0.0.1:4545/sitemap.xml");
    }

    #[test]
    fn test_contains_same_origin() {
        let origin = Origin::parse("https://example.com").unwrap();
        assert!(origin.contains_key("https://example.com"));
        assert!(origin.contains_key("https://example.com/a/b"));
    }

    #[test]
    fn test_rejects_external_host() {
        let origin = Origin::parse("https://example.com").unwrap();
        assert!(!origin.contains_key("https://other.com/page"));
        assert!(!origin.contains_key("http://example.com/page"));
    }

    #[test]
    fn test_rejects_host_prefix_collisions() {
        let origin = Origin::parse("https://example.com").unwrap();
        assert!(!origin.contains_key("https://example.community/page"));
        assert!(!origin.contains_key("https://example.com.evil.net/page"));
        assert!(!origin.contains_key("https://example.com:8080/page"));
    }

    #[test]
    fn test_invalid_seed() {
        assert!(Origin::parse("not a url").is_err());
        assert!(Origin::parse("ftp://example.com").is_err());
    }
}
