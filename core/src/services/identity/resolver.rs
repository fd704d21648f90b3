//! Cache-aside identity resolver

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::user::User;
use crate::errors::AuthError;
use crate::repositories::UserRepository;
use crate::services::cache::CacheStore;
use crate::services::token::TokenService;

use super::config::IdentityResolverConfig;

/// Where a resolved identity was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Cache,
    Store,
}

/// An identity resolved from a verified token
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub user: User,
    pub source: IdentitySource,
}

/// Resolves bearer tokens to users
///
/// Token verification failures are rejected before any cache or store
/// access. Cache failures of any kind degrade to a store read. A store
/// read is followed by a detached write-back of the snapshot that the
/// current request never waits on.
pub struct IdentityResolver<U, C>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
{
    tokens: Arc<TokenService>,
    users: Arc<U>,
    cache: Arc<C>,
    config: IdentityResolverConfig,
}

impl<U, C> IdentityResolver<U, C>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
{
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<U>,
        cache: Arc<C>,
        config: IdentityResolverConfig,
    ) -> Self {
        Self {
            tokens,
            users,
            cache,
            config,
        }
    }

    /// Resolves a raw token (without the `Bearer ` prefix) to a user
    pub async fn resolve(&self, token: &str) -> Result<ResolvedIdentity, AuthError> {
        let user_id = self.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AuthError::from(e)
        })?;

        self.resolve_id(user_id).await
    }

    /// Resolves an already verified identity id to a user
    pub async fn resolve_id(&self, user_id: u64) -> Result<ResolvedIdentity, AuthError> {
        let key = User::cache_key(user_id);

        if let Some(user) = self.read_cache(&key, user_id).await {
            debug!(user_id, "Identity cache hit");
            return Ok(ResolvedIdentity {
                user,
                source: IdentitySource::Cache,
            });
        }

        debug!(user_id, "Identity cache miss");

        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => {
                self.schedule_write_back(key, &user);
                Ok(ResolvedIdentity {
                    user,
                    source: IdentitySource::Store,
                })
            }
            Ok(None) => {
                warn!(user_id, "Token subject does not exist");
                Err(AuthError::NotFound)
            }
            Err(e) => {
                error!(user_id, error = %e, "Failed to load identity from store");
                Err(AuthError::StoreUnavailable)
            }
        }
    }

    async fn read_cache(&self, key: &str, user_id: u64) -> Option<User> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Identity cache read failed, falling back to store");
                return None;
            }
        };

        match serde_json::from_slice::<User>(&bytes) {
            Ok(user) if user.id == user_id => Some(user),
            Ok(user) => {
                warn!(key, cached_id = user.id, "Identity cache entry holds another user");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Corrupt identity cache entry, falling back to store");
                None
            }
        }
    }

    fn schedule_write_back(&self, key: String, user: &User) {
        let bytes = match serde_json::to_vec(user) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize identity snapshot");
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let ttl = self.config.cache_ttl;

        tokio::spawn(async move {
            if let Err(e) = cache.set(&key, bytes, ttl).await {
                warn!(key = %key, error = %e, "Identity cache write-back failed");
            }
        });
    }
}
