//! Validated crawl configuration.
//!
//! Loading and merging of configuration sources is left to the binary; the
//! core only receives the resulting values.

mod crawl;

pub use crawl::CrawlConfig;

use thiserror::Error;

/// Errors that can occur while validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("validation error: {0}")]
    ValidationError(String),
}
