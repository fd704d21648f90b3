//! Request handling support shared by all routes

pub mod error;
pub mod health;

pub use error::ApiError;
pub use health::{HealthChecks, HealthProbe};
