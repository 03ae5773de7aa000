// Session cache: key -> JSON value with expiry
pub mod memory_cache;

pub use memory_cache::*;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Invalid ttl: {0:?}")]
    InvalidTtl(Duration),
    #[error("Cache error: {0}")]
    Backend(String),
}

/// Ephemeral key/value storage with per-entry time-to-live.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Store `value` under `key`, replacing any previous entry. The entry
    /// becomes unavailable once `ttl` has elapsed.
    async fn set_value(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;

    /// Fetch the live value under `key`; expired entries read as `None`.
    async fn get_value(&self, key: &str) -> Result<Option<Value>, CacheError>;
}
