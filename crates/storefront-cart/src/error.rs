//! Cart error types.

use storefront_cache::CacheError;
use thiserror::Error;

/// Errors raised while configuring the cart or talking to its store.
///
/// Cart operations themselves never fail; storage errors are logged and
/// swallowed by [`CartStorage`](crate::cart::CartStorage).
#[derive(Error, Debug)]
pub enum CartError {
    /// Underlying cache/store error.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed as TOML.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
