//! Persisted artifacts generated from the final URL list
//!
//! Three formats: a plain-text list (`/fetch <url>` per line), an XML sitemap
//! (one `<url><loc>` entry per URL), and a JSON document (`{ "urls": [...] }`).
//! The crawl engine itself only produces the sorted URL sequence; these
//! writers are a thin wrapper the CLI calls afterwards.

use crate::OutputError;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct UrlListDocument<'a> {
    urls: &'a [String],
}

/// Writes the plain-text URL list, one `/fetch <url>` line per URL
pub fn write_url_list(urls: &[String], path: &Path) -> Result<(), OutputError> {
    let lines = urls
        .iter()
        .map(|url| format!("/fetch {}", url))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, lines)?;
    tracing::info!("wrote {} URLs to {}", urls.len(), path.display());
    Ok(())
}

/// Writes an XML sitemap with one `<url><loc>` entry per URL
pub fn write_sitemap_xml(urls: &[String], path: &Path) -> Result<(), OutputError> {
    let entries = urls
        .iter()
        .map(|url| format!("  <url>\n    <loc>{}</loc>\n  </url>", xml_escape(url)))
        .collect::<Vec<_>>()
        .join("\n");

    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}\n\
         </urlset>",
        entries
    );

    fs::write(path, document)?;
    tracing::info!("generated {} with {} URLs", path.display(), urls.len());
    Ok(())
}

/// Writes the JSON document `{ "urls": [...] }`
pub fn write_sitemap_json(urls: &[String], path: &Path) -> Result<(), OutputError> {
    let document = serde_json::to_string_pretty(&UrlListDocument { urls })?;
    fs::write(path, document)?;
    tracing::info!("generated {} with {} URLs", path.display(), urls.len());
    Ok(())
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> Vec<String> {
        vec![
            "https://example.com".to_string(),
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ]
    }

    #[test]
    fn test_write_url_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_urls.txt");

        write_url_list(&urls(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "/fetch https://example.com\n\
             /fetch https://example.com/a\n\
             /fetch https://example.com/b"
        );
    }

    #[test]
    fn test_write_sitemap_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");

        write_sitemap_xml(&urls(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(contents.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(contents.contains("    <loc>https://example.com/a</loc>"));
        assert!(contents.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_sitemap_xml_escapes_ampersands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        let urls = vec!["https://example.com/page?a=1&b=2".to_string()];

        write_sitemap_xml(&urls, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<loc>https://example.com/page?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_write_sitemap_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.json");

        write_sitemap_json(&urls(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["urls"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["urls"][0], "https://example.com");
    }

    #[test]
    fn test_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_urls.txt");

        write_url_list(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
