//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Destiny Market backend.
//! It provides concrete implementations of the storage seams defined in `mp_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx. Order placement runs the
//!   conditional sold-flag update and the order insert in one transaction.
//! - **Cache**: Redis client implementing the core `CacheStore` trait.

// Re-export core types for convenience
pub use mp_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    //! Database and Redis settings, shared with the other crates

    pub use mp_shared::config::{CacheConfig, DatabaseConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
