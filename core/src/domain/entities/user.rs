//! User entity representing a registered member of the marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the cache key under which a user snapshot is stored
pub const USER_CACHE_KEY_PREFIX: &str = "user_";

/// User entity representing a registered member
///
/// The serialized form of this struct is the snapshot written to the cache
/// layer by the identity resolver, so field renames are cache-format changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: u64,

    /// Account telephone number (11 digits, unique)
    pub telephone: String,

    /// Bcrypt hash of the account password
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Free-form gender label
    pub gender: String,

    /// Avatar object reference
    pub avatar: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Cache key of the snapshot for the given user id
    pub fn cache_key(id: u64) -> String {
        format!("{}{}", USER_CACHE_KEY_PREFIX, id)
    }
}

/// Data required to persist a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub telephone: String,
    pub password_hash: String,
    pub name: String,
    pub gender: String,
    pub avatar: String,
}

impl NewUser {
    /// Creates a new user record with the given credentials
    pub fn new(
        telephone: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            telephone: telephone.into(),
            password_hash: password_hash.into(),
            name: name.into(),
            gender: String::new(),
            avatar: String::new(),
        }
    }

    /// Sets the optional profile fields supplied at registration
    pub fn with_profile(mut self, gender: impl Into<String>, avatar: impl Into<String>) -> Self {
        self.gender = gender.into();
        self.avatar = avatar.into();
        self
    }

    /// Materializes the record with a store-assigned id
    pub fn into_user(self, id: u64) -> User {
        let now = Utc::now();
        User {
            id,
            telephone: self.telephone,
            password_hash: self.password_hash,
            name: self.name,
            gender: self.gender,
            avatar: self.avatar,
            created_at: now,
            updated_at: now,
        }
    }
}
