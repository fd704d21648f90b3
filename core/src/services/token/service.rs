//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Service issuing and verifying signed identity tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a token for the given user, valid from now
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_for(user.id)
    }

    /// Issues a token for a user id, valid from now
    pub fn issue_for(&self, user_id: u64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if it had been created at `issued_at`
    pub fn issue_at(&self, user_id: u64, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(
            user_id,
            issued_at,
            self.config.token_expiry,
            &self.config.issuer,
        );

        encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies a token and returns the decoded claims
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::TokenExpired)` - Signature valid but past expiry
    /// * `Err(TokenError::Malformed)` - Undecodable, bad signature or issuer
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::Malformed,
            })
    }

    /// Verifies a token and returns the identity id it was issued for
    pub fn verify(&self, token: &str) -> Result<u64, TokenError> {
        let claims = self.decode_claims(token)?;
        claims.user_id().ok_or(TokenError::Malformed)
    }

    /// Configured token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.token_expiry.num_seconds()
    }
}
