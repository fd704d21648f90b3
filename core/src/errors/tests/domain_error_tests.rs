//! Unit tests for domain error types

use crate::errors::{AccountError, AuthError, DomainError, OrderError, TokenError};

#[test]
fn test_token_error_maps_to_auth_error() {
    assert_eq!(AuthError::from(TokenError::TokenExpired), AuthError::Expired);
    assert_eq!(AuthError::from(TokenError::Malformed), AuthError::Malformed);
    assert_eq!(
        AuthError::from(TokenError::TokenGenerationFailed),
        AuthError::Malformed
    );
}

#[test]
fn test_token_error_maps_to_account_error() {
    let err = AccountError::from(TokenError::TokenGenerationFailed);
    assert!(matches!(err, AccountError::Internal { .. }));
}

#[test]
fn test_domain_error_messages() {
    let err = DomainError::Database {
        message: "connection refused".to_string(),
    };
    assert!(err.to_string().contains("connection refused"));

    let err = DomainError::NotFound {
        resource: "address 9".to_string(),
    };
    assert_eq!(err.to_string(), "Resource not found: address 9");
}

#[test]
fn test_order_error_messages() {
    let err = OrderError::InvalidReference {
        resource: "address".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid reference: address");
    assert_eq!(OrderError::AlreadySold.to_string(), "Good already sold");
}
