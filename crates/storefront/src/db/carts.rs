//! Cart repository for the `shopping_carts` table.
//!
//! The line sequence lives in the `cart_items` JSONB column. A partial
//! unique index on `(user_id) WHERE status = 'in_progress'` guarantees
//! at most one in-progress cart per user, so get-or-create can race
//! safely: the insert is `ON CONFLICT DO NOTHING` and the caller
//! re-selects.

use std::str::FromStr;

use sqlx::PgPool;
use sqlx::types::Json;

use rinkside_core::{CartId, CartStatus, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartLine};

/// Database row for a shopping cart.
#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    status: String,
    cart_items: Json<Vec<CartLine>>,
}

impl TryFrom<CartRow> for Cart {
    type Error = RepositoryError;

    fn try_from(row: CartRow) -> Result<Self, RepositoryError> {
        let status = CartStatus::from_str(&row.status)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid cart status: {e}")))?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            status,
            lines: row.cart_items.0,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's in-progress cart, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored lines or
    /// status cannot be decoded.
    pub async fn find_in_progress(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, user_id, status, cart_items
            FROM shopping_carts
            WHERE user_id = $1 AND status = $2
            ",
        )
        .bind(user_id)
        .bind(CartStatus::InProgress.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Cart::try_from).transpose()
    }

    /// Insert an empty in-progress cart for a user.
    ///
    /// A no-op if the user already has one: the partial unique index
    /// absorbs the conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_empty(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopping_carts (user_id, status, cart_items)
            VALUES ($1, $2, '[]'::jsonb)
            ON CONFLICT (user_id) WHERE status = 'in_progress' DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(CartStatus::InProgress.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite the line sequence of a user's in-progress cart.
    ///
    /// Last-writer-wins; there is no optimistic concurrency check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no in-progress cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_lines(
        &self,
        user_id: UserId,
        lines: &[CartLine],
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shopping_carts
            SET cart_items = $1, updated_at = now()
            WHERE user_id = $2 AND status = $3
            ",
        )
        .bind(Json(lines))
        .bind(user_id)
        .bind(CartStatus::InProgress.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Empty the line sequence of a user's in-progress cart.
    ///
    /// The cart row is retained, not deleted, so it is reusable by
    /// get-or-create after a purchase.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no in-progress cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shopping_carts
            SET cart_items = '[]'::jsonb, updated_at = now()
            WHERE user_id = $1 AND status = $2
            ",
        )
        .bind(user_id)
        .bind(CartStatus::InProgress.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
