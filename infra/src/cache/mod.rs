//! Cache module for Redis-based caching
//!
//! Provides the Redis implementation of the core `CacheStore` trait with
//! connection retry, command retry and key namespacing.

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use mp_shared::config::CacheConfig;
