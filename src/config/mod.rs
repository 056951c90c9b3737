//! Run configuration
//!
//! Loads an optional TOML file into a `CrawlConfig`; every field has a
//! default, and the CLI may override individual values.

mod parser;
mod types;

pub use parser::{load_config, validate};
pub use types::CrawlConfig;
