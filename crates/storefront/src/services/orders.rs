//! Order service: purchase completion and order history.

use sqlx::PgPool;
use thiserror::Error;

use rinkside_core::UserId;

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::models::{Cart, Order};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    carts: CartRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            carts: CartRepository::new(pool),
        }
    }

    /// Record a completed purchase from the given cart, then empty the cart.
    ///
    /// The order total is computed from the cart's stored line prices, not
    /// the live catalog. Insert and clear are two separate statements; a
    /// crash between them leaves the order recorded with the cart intact,
    /// which a retry of the clear resolves.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if either statement fails.
    pub async fn complete_order(
        &self,
        user_id: UserId,
        cart: &Cart,
        payment_method: &str,
        transaction_id: &str,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .insert(user_id, &cart.lines, cart.total(), payment_method, transaction_id)
            .await?;

        self.carts.clear(user_id).await?;

        Ok(order)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }
}
