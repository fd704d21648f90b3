//! Unit tests for the token service

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_service() -> TokenService {
    TokenService::new(TokenServiceConfig::default().with_expiry(Duration::hours(1)))
}

fn service_with(config: TokenServiceConfig) -> TokenService {
    TokenService::new(config)
}

#[test]
fn test_issue_and_verify() {
    let service = create_service();

    let token = service.issue_for(42).unwrap();
    assert_eq!(service.verify(&token).unwrap(), 42);

    let claims = service.decode_claims(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.iss, "destiny-market");
    assert_eq!(service.expires_in(), 3600);
}

#[test]
fn test_token_issued_half_an_hour_ago_is_valid() {
    let service = create_service();

    let token = service
        .issue_at(42, Utc::now() - Duration::minutes(30))
        .unwrap();

    assert_eq!(service.verify(&token).unwrap(), 42);
}

#[test]
fn test_expired_token() {
    let service = create_service();

    let token = service
        .issue_at(42, Utc::now() - Duration::hours(2))
        .unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::TokenExpired));
}

#[test]
fn test_garbage_token_is_malformed() {
    let service = create_service();

    assert_eq!(service.verify("not-a-jwt"), Err(TokenError::Malformed));
    assert_eq!(service.verify(""), Err(TokenError::Malformed));
}

#[test]
fn test_signature_mismatch_is_malformed() {
    let service = create_service();
    let other = service_with(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });

    let token = other.issue_for(42).unwrap();
    assert_eq!(service.verify(&token), Err(TokenError::Malformed));
}

#[test]
fn test_expired_token_with_bad_signature_is_malformed() {
    let service = create_service();
    let other = service_with(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });

    let token = other
        .issue_at(42, Utc::now() - Duration::days(30))
        .unwrap();
    assert_eq!(service.verify(&token), Err(TokenError::Malformed));
}

#[test]
fn test_wrong_issuer_is_malformed() {
    let service = create_service();
    let other = service_with(TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..TokenServiceConfig::default()
    });

    let token = other.issue_for(42).unwrap();
    assert_eq!(service.verify(&token), Err(TokenError::Malformed));
}

#[test]
fn test_non_numeric_subject_is_malformed() {
    let config = TokenServiceConfig::default();
    let service = service_with(config.clone());

    let mut claims = Claims::new(1, Utc::now(), Duration::hours(1), &config.issuer);
    claims.sub = "admin".to_string();
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::Malformed));
}
