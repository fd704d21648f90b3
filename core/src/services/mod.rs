//! Business services containing domain logic and use cases.

pub mod account;
pub mod cache;
pub mod identity;
pub mod order;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, AuthenticatedAccount, Registration};
pub use cache::{CacheStore, MemoryCacheStore};
pub use identity::{IdentityResolver, IdentityResolverConfig, IdentitySource, ResolvedIdentity};
pub use order::OrderService;
pub use token::{TokenService, TokenServiceConfig};
