//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository with call counting and failure injection
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: AtomicU64,
    find_by_id_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            find_by_id_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert a user with a caller-chosen id
    pub async fn insert(&self, user: User) {
        self.next_id.fetch_max(user.id + 1, Ordering::SeqCst);
        self.users.write().await.insert(user.id, user);
    }

    /// Number of `find_by_id` calls made so far
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a database error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "user store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_telephone(&self, telephone: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;

        let users = self.users.read().await;
        Ok(users.values().find(|u| u.telephone == telephone).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.check_available()?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.telephone == user.telephone) {
            return Err(DomainError::Conflict {
                message: "Telephone already registered".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = user.into_user(id);
        users.insert(id, user.clone());
        Ok(user)
    }
}
