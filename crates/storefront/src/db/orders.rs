//! Order repository for the `orders` table.
//!
//! Orders are insert-only: a row is written once at purchase time and
//! never mutated. The purchased lines are stored as a JSONB snapshot in
//! the `items` column.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use rinkside_core::{Cents, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{CartLine, Order};

/// Database row for an order.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    items: Json<Vec<CartLine>>,
    status: String,
    total_in_cents: Cents,
    payment_method: String,
    transaction_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, RepositoryError> {
        let status = OrderStatus::from_str(&row.status)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order status: {e}")))?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            lines: row.items.0,
            status,
            total: row.total_in_cents,
            payment_method: row.payment_method,
            transaction_id: row.transaction_id,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a completed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        total: Cents,
        payment_method: &str,
        transaction_id: &str,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, items, status, total_in_cents, payment_method, transaction_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, items, status, total_in_cents, payment_method, transaction_id, created_at
            ",
        )
        .bind(user_id)
        .bind(Json(lines))
        .bind(OrderStatus::Completed.as_str())
        .bind(total)
        .bind(payment_method)
        .bind(transaction_id)
        .fetch_one(self.pool)
        .await?;

        Order::try_from(row)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored snapshot or
    /// status cannot be decoded.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, status, total_in_cents, payment_method, transaction_id, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
