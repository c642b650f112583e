//! Order domain type.

use chrono::{DateTime, Utc};

use rinkside_core::{Cents, OrderId, OrderStatus, UserId};

use super::cart::CartLine;

/// A completed purchase.
///
/// Immutable once created. `lines` is the order snapshot: a copy of the
/// cart's line sequence captured at purchase time.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Snapshot of the purchased cart lines.
    pub lines: Vec<CartLine>,
    /// Order status.
    pub status: OrderStatus,
    /// Total price at purchase time, in whole cents.
    pub total: Cents,
    /// Payment method, persisted as an opaque string.
    pub payment_method: String,
    /// Payment transaction id, persisted as an opaque string.
    pub transaction_id: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
