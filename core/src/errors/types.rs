//! Error types for token handling, identity resolution, ordering and caching
//!
//! Every variant here is a distinct internal condition. How these collapse
//! into client-visible responses is decided in the presentation layer.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Failures of the request authentication gate
///
/// All variants are rejected the same way at the edge. They are kept apart
/// so logs tell absence from infrastructure trouble.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or malformed credentials")]
    Malformed,

    #[error("Credentials expired")]
    Expired,

    #[error("Identity not found")]
    NotFound,

    #[error("Identity store unavailable")]
    StoreUnavailable,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::TokenExpired => AuthError::Expired,
            TokenError::Malformed | TokenError::TokenGenerationFailed => AuthError::Malformed,
        }
    }
}

/// Failures of order placement and lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Good already sold")]
    AlreadySold,

    #[error("Order store unavailable")]
    StoreUnavailable,

    #[error("Invalid reference: {resource}")]
    InvalidReference { resource: String },

    #[error("Order not found")]
    NotFound,
}

/// Cache layer errors, never escalated to a request failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache unavailable: {message}")]
    Unavailable { message: String },
}

/// Registration and login failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Telephone already registered")]
    TelephoneExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account store unavailable")]
    StoreUnavailable,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        AccountError::Internal {
            message: err.to_string(),
        }
    }
}
