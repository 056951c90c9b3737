use crate::config::CrawlConfig;
use crate::ConfigError;
use std::fs;
use std::path::Path;

/// Loads and validates a TOML configuration file
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: CrawlConfig = toml::from_str(&contents)?;
    validate(&config)?;
    Ok(config)
}

/// Checks a configuration for values the crawl engine cannot work with
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.workers == 0 {
        return Err(ConfigError::Validation(
            "workers must be at least 1".to_string(),
        ));
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be greater than 0".to_string(),
        ));
    }
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }
    Ok(())
}
