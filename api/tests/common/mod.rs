//! Shared fixtures for API integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mp_api::handlers::HealthChecks;
use mp_api::AppState;
use mp_core::domain::entities::good::Good;
use mp_core::domain::entities::user::{NewUser, User};
use mp_core::repositories::{MockOrderRepository, MockUserRepository};
use mp_core::services::{
    AccountService, AccountServiceConfig, CacheStore, IdentityResolver, IdentityResolverConfig,
    MemoryCacheStore, OrderService, TokenService, TokenServiceConfig,
};
use mp_shared::config::{CorsConfig, ServerConfig};

pub type TestState = AppState<MockUserRepository, MemoryCacheStore, MockOrderRepository>;

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub orders: Arc<MockOrderRepository>,
    pub cache: Arc<MemoryCacheStore>,
    pub tokens: Arc<TokenService>,
    pub state: web::Data<TestState>,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_health_checks(HealthChecks::new())
    }

    pub fn with_health_checks(health: HealthChecks) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let orders = Arc::new(MockOrderRepository::new());
        let cache = Arc::new(MemoryCacheStore::new());
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

        let identity = Arc::new(IdentityResolver::new(
            Arc::clone(&tokens),
            Arc::clone(&users),
            Arc::clone(&cache),
            IdentityResolverConfig::default(),
        ));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&users),
            Arc::clone(&tokens),
            AccountServiceConfig { bcrypt_cost: 4 },
        ));
        let order_service = Arc::new(OrderService::new(Arc::clone(&orders)));

        Self {
            users,
            orders,
            cache,
            tokens,
            state: web::Data::new(
                AppState::new(identity, accounts, order_service).with_health_checks(health),
            ),
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    /// Stores a user directly and returns it with a valid token
    pub async fn seed_user(&self, id: u64) -> (User, String) {
        let user = NewUser::new(format!("138{:08}", id), "unused-hash", format!("member-{}", id))
            .with_profile("female", "avatars/default.png")
            .into_user(id);
        self.users.insert(user.clone()).await;
        let token = self.tokens.issue(&user).expect("token issued");
        (user, token)
    }

    /// Stores an unsold good and a deliverable address
    pub async fn seed_good(&self, good_id: u64, price: i64, address_id: u64) {
        self.orders.insert_good(Good::new(good_id, 1, price)).await;
        self.orders.insert_address(address_id).await;
    }

    /// Waits for the detached cache write-back of a user snapshot
    pub async fn wait_for_cached(&self, user_id: u64) {
        let key = User::cache_key(user_id);
        for _ in 0..200 {
            if self.cache.contains(&key).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("identity {} was never written back to the cache", user_id);
    }

    pub async fn cached_snapshot(&self, user_id: u64) -> Option<User> {
        let bytes = self
            .cache
            .get(&User::cache_key(user_id))
            .await
            .expect("memory cache read")?;
        serde_json::from_slice(&bytes).ok()
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
