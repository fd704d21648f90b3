//! Identity resolution for authenticated requests
//!
//! Turns a bearer token into the [`User`](crate::domain::entities::User) it
//! was issued for, reading through the cache layer and falling back to the
//! user store.

mod config;
mod resolver;

#[cfg(test)]
mod tests;

pub use config::IdentityResolverConfig;
pub use resolver::{IdentityResolver, IdentitySource, ResolvedIdentity};
