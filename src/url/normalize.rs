use crate::UrlError;
use url::Url;

/// Normalizes a URL into the canonical key used for dedup comparison
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not absolute
/// 2. Reject non-HTTP(S) schemes
/// 3. Lowercase scheme, host, and path
/// 4. Keep an explicit port if present
/// 5. Strip trailing slashes (the root path collapses to nothing)
/// 6. Drop the query string and fragment entirely
///
/// Two URLs differing only in case, trailing slash, query, or fragment map to
/// the same key and are treated as one page. The original spelling is what
/// gets fetched and reported; only dedup logic operates on this form.
///
/// Normalization is idempotent: `normalize_url(&normalize_url(u)?) ==
/// normalize_url(u)`.
///
/// # Examples
///
/// ```
/// use linkmap::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://Example.com/Path/").unwrap(),
///     "https://example.com/path"
/// );
/// assert_eq!(
///     normalize_url("https://example.com/?q=1").unwrap(),
///     "https://example.com"
/// );
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    // Url::parse already lowercases scheme and host
    let host = url.host_str().ok_or(UrlError::MissingHost)?;

    let mut key = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }

    let path = url.path().to_lowercase();
    key.push_str(path.trim_end_matches('/'));

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_host_and_path() {
        let key = normalize_url("https://Example.com/Path/").unwrap();
        assert_eq!(key, "https://example.com/path");
    }

    #[test]
    fn test_strip_query() {
        let key = normalize_url("https://example.com/?q=1").unwrap();
        assert_eq!(key, "https://example.com");
    }

    #[test]
    fn test_strip_fragment() {
        let key = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(key, "https://example.com/page");
    }

    #[test]
    fn test_strip_trailing_slash() {
        let key = normalize_url("https://example.com/page/").unwrap();
        assert_eq!(key, "https://example.com/page");
    }

    #[test]
    fn test_collapses_repeated_trailing_slashes() {
        assert_eq!(
            normalize_url("https://example.com//").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("https://example.com/a///").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_root_collapses() {
        assert_eq!(
            normalize_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_port_preserved() {
        let key = normalize_url("http://127.0.0.1:8080/Page").unwrap();
        assert_eq!(key, "http://127.0.0.1:8080/page");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://Example.com/Path/",
            "https://example.com/?q=1#frag",
            "https://example.com//",
            "https://example.com/a///",
            "http://127.0.0.1:8080/a/b/",
            "https://example.com",
        ];
        for input in inputs {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(normalize_url("/relative/path").is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            normalize_url("mailto:someone@example.com"),
            Err(UrlError::InvalidScheme(_)) | Err(UrlError::MissingHost)
        ));
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
    }
}
