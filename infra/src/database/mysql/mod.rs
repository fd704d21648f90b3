//! MySQL repository implementations

mod order_repository_impl;
mod user_repository_impl;

pub use order_repository_impl::MySqlOrderRepository;
pub use user_repository_impl::MySqlUserRepository;

use mp_core::errors::DomainError;

/// Wraps a SQLx error as a domain database error with context
pub(crate) fn database_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", context, err),
    }
}

/// Whether the error is a unique key violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether the error is a foreign key violation
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
