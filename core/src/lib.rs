//! # Destiny Market Core
//!
//! Core business logic and domain layer for the Destiny Market backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.
//!
//! The two services with real invariants live here:
//! - [`services::identity::IdentityResolver`] turns a bearer token into a
//!   [`domain::entities::User`] through a cache-aside lookup.
//! - [`services::order::OrderService`] reserves a good and creates its order
//!   so that a good is never sold twice.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Good, NewUser, Order, PlaceOrder, PlaceOrderOutcome, User};
pub use errors::{AccountError, AuthError, CacheError, DomainError, OrderError, TokenError};
pub use repositories::{MockOrderRepository, MockUserRepository, OrderRepository, UserRepository};
pub use services::{
    AccountService, AccountServiceConfig, AuthenticatedAccount, CacheStore, IdentityResolver,
    IdentityResolverConfig, IdentitySource, MemoryCacheStore, OrderService, Registration,
    ResolvedIdentity, TokenService, TokenServiceConfig,
};
