//! URL handling: normalization for dedup and origin scoping
//!
//! The normalizer produces the canonical key the coordinator dedups on; the
//! `Origin` type bounds the crawl to one scheme+host(+port) prefix.

mod normalize;
mod origin;

pub use normalize::normalize_url;
pub use origin::Origin;
