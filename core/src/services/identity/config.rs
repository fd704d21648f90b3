//! Configuration for the identity resolver

use std::time::Duration;

use mp_shared::config::CacheConfig;

/// Configuration for the identity resolver
#[derive(Debug, Clone)]
pub struct IdentityResolverConfig {
    /// Expiration of identity snapshots written back to the cache
    pub cache_ttl: Duration,
}

impl Default for IdentityResolverConfig {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for IdentityResolverConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.identity_ttl),
        }
    }
}
