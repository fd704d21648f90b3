//! HTTP error mapping for API handlers
//!
//! Every error a handler or middleware can produce ends up here and is
//! rendered as the shared `ErrorResponse` envelope.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mp_core::errors::{AccountError, AuthError, OrderError};
use mp_shared::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";
const INVALID_REFERENCE_MESSAGE: &str = "Referenced good or address does not exist";

/// Errors returned from API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Any authentication failure; the cause is never exposed to the client
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => error_codes::UNAUTHORIZED,
            ApiError::BadRequest { .. } => error_codes::BAD_REQUEST,
            ApiError::Validation(_) => error_codes::VALIDATION_ERROR,
            ApiError::Order(e) => match e {
                OrderError::AlreadySold => error_codes::GOOD_ALREADY_SOLD,
                OrderError::InvalidReference { .. } => error_codes::INVALID_REFERENCE,
                OrderError::NotFound => error_codes::NOT_FOUND,
                OrderError::StoreUnavailable => error_codes::SERVICE_UNAVAILABLE,
            },
            ApiError::Account(e) => match e {
                AccountError::InvalidInput { .. } => error_codes::VALIDATION_ERROR,
                AccountError::TelephoneExists => error_codes::TELEPHONE_EXISTS,
                AccountError::UserNotFound => error_codes::USER_NOT_FOUND,
                AccountError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AccountError::StoreUnavailable => error_codes::SERVICE_UNAVAILABLE,
                AccountError::Internal { .. } => error_codes::INTERNAL_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            ApiError::Order(OrderError::StoreUnavailable)
            | ApiError::Account(AccountError::StoreUnavailable) => UNAVAILABLE_MESSAGE.to_string(),
            ApiError::Order(OrderError::InvalidReference { .. }) => {
                INVALID_REFERENCE_MESSAGE.to_string()
            }
            ApiError::Account(AccountError::Internal { .. }) => {
                "An internal error occurred".to_string()
            }
            ApiError::Validation(_) => "Invalid request".to_string(),
            other => other.to_string(),
        }
    }

    /// Builds the response body for this error
    pub fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.message());

        match self {
            ApiError::Validation(errors) => {
                errors
                    .field_errors()
                    .into_iter()
                    .fold(response, |response, (field, errors)| {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        response.add_detail(field.to_string(), messages)
                    })
            }
            _ => response,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest { .. } | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Order(e) => match e {
                OrderError::AlreadySold => StatusCode::CONFLICT,
                OrderError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
                OrderError::NotFound => StatusCode::NOT_FOUND,
                OrderError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Account(e) => match e {
                AccountError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                AccountError::TelephoneExists => StatusCode::CONFLICT,
                AccountError::UserNotFound => StatusCode::NOT_FOUND,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                AccountError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}
