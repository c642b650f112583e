//! Cart service: get-or-create, merge, persist, clear.
//!
//! All writes are last-writer-wins over the cart's JSONB line column;
//! overlapping requests from the same user can lose an update. The only
//! race that is prevented is duplicate in-progress cart creation, which
//! the partial unique index absorbs.

use sqlx::PgPool;
use thiserror::Error;

use rinkside_core::UserId;

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::models::{Cart, EquipmentItem};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity was not a positive integer.
    #[error("invalid quantity: must be a positive integer")]
    InvalidQuantity,

    /// The referenced catalog item does not exist.
    #[error("item not found")]
    ItemNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Parse a form-submitted quantity.
///
/// Rejects anything that is not a positive integer before any
/// persistence call is made.
///
/// # Errors
///
/// Returns `CartError::InvalidQuantity` for non-integer or non-positive input.
pub fn parse_quantity(raw: &str) -> Result<u32, CartError> {
    let quantity: i64 = raw.trim().parse().map_err(|_| CartError::InvalidQuantity)?;
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity);
    }
    u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity)
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// Get the user's in-progress cart, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the database operations fail.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, CartError> {
        if let Some(cart) = self.carts.find_in_progress(user_id).await? {
            return Ok(cart);
        }

        // Lost races land on the existing row via ON CONFLICT DO NOTHING,
        // so the re-select always finds exactly one cart.
        self.carts.insert_empty(user_id).await?;
        let cart = self
            .carts
            .find_in_progress(user_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(cart)
    }

    /// Merge an item into the user's cart and persist the result.
    ///
    /// The quantity must already be validated via [`parse_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the database operations fail.
    pub async fn add_item(
        &self,
        user_id: UserId,
        item: &EquipmentItem,
        quantity: u32,
        size: Option<String>,
    ) -> Result<Cart, CartError> {
        let mut cart = self.get_or_create(user_id).await?;
        cart.add_line(item, quantity, size);
        self.persist(user_id, &cart).await?;
        Ok(cart)
    }

    /// Overwrite the stored line sequence of the user's in-progress cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the update fails.
    pub async fn persist(&self, user_id: UserId, cart: &Cart) -> Result<(), CartError> {
        self.carts.update_lines(user_id, &cart.lines).await?;
        Ok(())
    }

    /// Empty the user's in-progress cart; the row is retained.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the update fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), CartError> {
        self.carts.clear(user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_accepts_positive_integers() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_quantity_rejects_zero_and_negative() {
        assert!(matches!(parse_quantity("0"), Err(CartError::InvalidQuantity)));
        assert!(matches!(
            parse_quantity("-1"),
            Err(CartError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_parse_quantity_rejects_non_integers() {
        for raw in ["", "abc", "1.5", "2x", "+ 3"] {
            assert!(
                matches!(parse_quantity(raw), Err(CartError::InvalidQuantity)),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
