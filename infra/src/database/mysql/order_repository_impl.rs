//! MySQL implementation of the OrderRepository trait.
//!
//! `place_order` is the compare-and-swap on the sold flag. Under InnoDB the
//! guarded `UPDATE` takes the row lock, so a concurrent transaction for the
//! same good blocks until this one ends and then matches zero rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};

use mp_core::domain::entities::good::Good;
use mp_core::domain::entities::order::{Order, PlaceOrder, PlaceOrderOutcome};
use mp_core::errors::DomainError;
use mp_core::repositories::OrderRepository;

use super::{database_error, is_foreign_key_violation, is_unique_violation};

/// MySQL implementation of OrderRepository
pub struct MySqlOrderRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    /// Create a new MySQL order repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_good(row: &sqlx::mysql::MySqlRow) -> Result<Good, sqlx::Error> {
        Ok(Good {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            picture: row.try_get("picture")?,
            price: row.try_get("price")?,
            is_sold: row.try_get("is_sold")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    fn row_to_order(row: &sqlx::mysql::MySqlRow) -> Result<Order, sqlx::Error> {
        Ok(Order {
            id: row.try_get("id")?,
            good_id: row.try_get("good_id")?,
            address_id: row.try_get("address_id")?,
            buyer_id: row.try_get("buyer_id")?,
            pay_money: row.try_get("pay_money")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    /// Runs the reservation inside `tx`; the caller commits or rolls back
    async fn reserve(
        tx: &mut Transaction<'static, MySql>,
        request: PlaceOrder,
    ) -> Result<PlaceOrderOutcome, sqlx::Error> {
        let reserved = sqlx::query("UPDATE goods SET is_sold = TRUE WHERE id = ? AND is_sold = FALSE")
            .bind(request.good_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if reserved == 0 {
            let exists = sqlx::query("SELECT id FROM goods WHERE id = ?")
                .bind(request.good_id)
                .fetch_optional(&mut **tx)
                .await?
                .is_some();

            return Ok(if exists {
                PlaceOrderOutcome::AlreadySold
            } else {
                PlaceOrderOutcome::GoodNotFound
            });
        }

        // The row is locked by the update above, so this is the price being paid
        let price: i64 = sqlx::query_scalar("SELECT price FROM goods WHERE id = ?")
            .bind(request.good_id)
            .fetch_one(&mut **tx)
            .await?;

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (good_id, address_id, buyer_id, pay_money)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(request.good_id)
        .bind(request.address_id)
        .bind(request.buyer_id)
        .bind(price)
        .execute(&mut **tx)
        .await?
        .last_insert_id();

        let row = sqlx::query(
            "SELECT id, good_id, address_id, buyer_id, pay_money, created_at FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(PlaceOrderOutcome::Placed(Self::row_to_order(&row)?))
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn find_good(&self, good_id: u64) -> Result<Option<Good>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, category_id, name, description, picture,
                   price, is_sold, created_at
            FROM goods
            WHERE id = ?
            "#,
        )
        .bind(good_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to query good", e))?;

        row.as_ref()
            .map(Self::row_to_good)
            .transpose()
            .map_err(|e| database_error("Failed to decode good", e))
    }

    async fn place_order(&self, request: PlaceOrder) -> Result<PlaceOrderOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        // Dropping `tx` on any early return or cancellation rolls it back
        let outcome = match Self::reserve(&mut tx, request).await {
            Ok(outcome) => outcome,
            Err(e) if is_unique_violation(&e) => PlaceOrderOutcome::AlreadySold,
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(DomainError::NotFound {
                    resource: format!("address {}", request.address_id),
                })
            }
            Err(e) => return Err(database_error("Failed to place order", e)),
        };

        match outcome {
            PlaceOrderOutcome::Placed(order) => {
                tx.commit()
                    .await
                    .map_err(|e| database_error("Failed to commit order", e))?;
                Ok(PlaceOrderOutcome::Placed(order))
            }
            other => {
                tx.rollback()
                    .await
                    .map_err(|e| database_error("Failed to roll back reservation", e))?;
                Ok(other)
            }
        }
    }

    async fn find_order(&self, order_id: u64) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(
            "SELECT id, good_id, address_id, buyer_id, pay_money, created_at FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to query order", e))?;

        row.as_ref()
            .map(Self::row_to_order)
            .transpose()
            .map_err(|e| database_error("Failed to decode order", e))
    }
}
