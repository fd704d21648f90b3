//! User repository trait defining the interface for user data persistence.
//!
//! The identity resolver depends only on [`UserRepository::find_by_id`];
//! registration and login use the telephone lookup and `create`.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations report absence as `Ok(None)` and reserve `Err` for
/// store failures, so callers can tell the two apart.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Find a user by account telephone number
    async fn find_by_telephone(&self, telephone: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The telephone is already registered
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}
