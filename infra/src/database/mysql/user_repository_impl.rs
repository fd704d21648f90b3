//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use mp_core::domain::entities::user::{NewUser, User};
use mp_core::errors::DomainError;
use mp_core::repositories::UserRepository;

use super::{database_error, is_unique_violation};

const USER_COLUMNS: &str =
    "id, telephone, password, name, gender, avatar, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| database_error(&format!("Failed to get {}", name), e);

        Ok(User {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            telephone: row.try_get("telephone").map_err(|e| column("telephone", e))?,
            password_hash: row.try_get("password").map_err(|e| column("password", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            gender: row.try_get("gender").map_err(|e| column("gender", e))?,
            avatar: row.try_get("avatar").map_err(|e| column("avatar", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_telephone(&self, telephone: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE telephone = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(telephone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (telephone, password, name, gender, avatar)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.telephone)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.gender)
        .bind(&user.avatar)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id(),
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::Conflict {
                    message: "Telephone already registered".to_string(),
                })
            }
            Err(e) => return Err(database_error("Failed to create user", e)),
        };

        self.find_by_id(id).await?.ok_or_else(|| DomainError::Internal {
            message: format!("Created user {} could not be read back", id),
        })
    }
}
