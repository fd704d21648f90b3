//! Trait for key/value cache integration

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::CacheError;

/// Key/value store with per-key expiration
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the raw value stored under `key`, `None` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value, for `ttl`
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}
