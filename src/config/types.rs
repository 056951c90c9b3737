use serde::Deserialize;

/// Run configuration for a crawl
///
/// All fields have defaults, so an empty TOML file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Number of concurrent worker slots
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Wall-clock budget for the whole run, in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pacing delay between successive dispatches, in milliseconds
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Stop after sitemap seeding; no worker pool, no link-following
    #[serde(rename = "sitemap-only", default)]
    pub sitemap_only: bool,
}

fn default_workers() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_pacing_ms() -> u64 {
    100
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            pacing_ms: default_pacing_ms(),
            user_agent: default_user_agent(),
            sitemap_only: false,
        }
    }
}
