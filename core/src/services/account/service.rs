//! Account service implementation

use std::sync::Arc;

use mp_shared::utils::phone::{is_valid_account_telephone, mask_phone_number};
use tracing::{error, info, warn};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AccountError, DomainError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;
use super::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Registration request
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub telephone: String,
    pub password: String,
    pub gender: String,
    pub avatar: String,
}

/// A user together with a freshly issued token
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub user: User,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Service handling registration and login
pub struct AccountService<U: UserRepository + 'static> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
    config: AccountServiceConfig,
}

impl<U: UserRepository + 'static> AccountService<U> {
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>, config: AccountServiceConfig) -> Self {
        Self {
            users,
            tokens,
            config,
        }
    }

    /// Registers a new account and issues its first token
    pub async fn register(&self, request: Registration) -> Result<AuthenticatedAccount, AccountError> {
        if request.name.trim().is_empty() {
            return Err(AccountError::InvalidInput {
                message: "invalid name".to_string(),
            });
        }
        validate_credentials(&request.telephone, &request.password)?;

        let masked = mask_phone_number(&request.telephone);

        let existing = self
            .users
            .find_by_telephone(&request.telephone)
            .await
            .map_err(|e| store_failure("find_by_telephone", e))?;
        if existing.is_some() {
            warn!(telephone = %masked, "Telephone already registered");
            return Err(AccountError::TelephoneExists);
        }

        let password_hash = self.hash_password(request.password).await?;

        let new_user = NewUser::new(request.telephone, password_hash, request.name)
            .with_profile(request.gender, request.avatar);

        let user = match self.users.create(new_user).await {
            Ok(user) => user,
            // Lost a concurrent registration for the same telephone
            Err(DomainError::Conflict { .. }) => return Err(AccountError::TelephoneExists),
            Err(e) => return Err(store_failure("create", e)),
        };

        info!(user_id = user.id, telephone = %masked, "User registered");
        self.authenticated(user)
    }

    /// Checks a telephone and password pair and issues a token
    pub async fn login(&self, telephone: &str, password: &str) -> Result<AuthenticatedAccount, AccountError> {
        validate_credentials(telephone, password)?;

        let masked = mask_phone_number(telephone);

        let user = self
            .users
            .find_by_telephone(telephone)
            .await
            .map_err(|e| store_failure("find_by_telephone", e))?
            .ok_or_else(|| {
                warn!(telephone = %masked, "Login for unknown telephone");
                AccountError::UserNotFound
            })?;

        if !self.verify_password(password.to_string(), user.password_hash.clone()).await? {
            warn!(user_id = user.id, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        self.authenticated(user)
    }

    fn authenticated(&self, user: User) -> Result<AuthenticatedAccount, AccountError> {
        let token = self.tokens.issue(&user)?;
        Ok(AuthenticatedAccount {
            user,
            token,
            expires_in: self.tokens.expires_in(),
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| internal("password hashing task failed", e))?
            .map_err(|e| internal("password hashing failed", e))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AccountError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| internal("password verification task failed", e))?
            .map_err(|e| internal("stored password hash is unreadable", e))
    }
}

fn validate_credentials(telephone: &str, password: &str) -> Result<(), AccountError> {
    if !is_valid_account_telephone(telephone) {
        return Err(AccountError::InvalidInput {
            message: "invalid telephone number".to_string(),
        });
    }

    let length = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(AccountError::InvalidInput {
            message: "invalid password".to_string(),
        });
    }

    Ok(())
}

fn store_failure(operation: &str, err: DomainError) -> AccountError {
    error!(operation, error = %err, "Account store failure");
    AccountError::StoreUnavailable
}

fn internal(context: &str, err: impl std::fmt::Display) -> AccountError {
    error!(error = %err, "{}", context);
    AccountError::Internal {
        message: context.to_string(),
    }
}
