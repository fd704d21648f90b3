//! Token service module for JWT management
//!
//! Tokens are stateless: issuing one has no side effects and verifying one
//! never touches a store. A token is valid until its expiry and cannot be
//! revoked earlier.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
