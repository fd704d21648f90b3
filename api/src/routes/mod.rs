//! Route handlers
//!
//! - `account` - Registration, login and the current user's profile
//! - `order` - Placing and reading orders

pub mod account;
pub mod order;

use std::sync::Arc;

use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::{AccountService, CacheStore, IdentityResolver, OrderService};

use crate::handlers::HealthChecks;

/// Application state that holds shared services
pub struct AppState<U, C, O>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    pub identity: Arc<IdentityResolver<U, C>>,
    pub accounts: Arc<AccountService<U>>,
    pub orders: Arc<OrderService<O>>,
    pub health: HealthChecks,
}

impl<U, C, O> AppState<U, C, O>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    pub fn new(
        identity: Arc<IdentityResolver<U, C>>,
        accounts: Arc<AccountService<U>>,
        orders: Arc<OrderService<O>>,
    ) -> Self {
        Self {
            identity,
            accounts,
            orders,
            health: HealthChecks::new(),
        }
    }

    /// Replace the probes reported by `/health`
    pub fn with_health_checks(mut self, health: HealthChecks) -> Self {
        self.health = health;
        self
    }
}
