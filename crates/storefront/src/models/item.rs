//! Catalog item domain type.

use rinkside_core::{Cents, ItemId};

/// A piece of hockey equipment in the catalog.
///
/// Read-only from the application's perspective; the catalog is seeded
/// externally.
#[derive(Debug, Clone)]
pub struct EquipmentItem {
    /// Unique item ID.
    pub id: ItemId,
    /// Display name, e.g. "Senior Goalie Stick".
    pub name: String,
    /// Longer description shown on the item detail page.
    pub description: String,
    /// Unit price in whole cents.
    pub price: Cents,
    /// Image path, relative to `/static`.
    pub image: String,
    /// Available sizes, if the item comes in sizes.
    pub sizes: Option<Vec<String>>,
}
