//! Shopping cart domain types.
//!
//! The cart's line sequence is what gets serialized into the
//! `shopping_carts.cart_items` JSONB column and copied into an order's
//! snapshot at purchase time. All merge and total logic lives here as
//! pure functions so it can be exercised without a database.

use serde::{Deserialize, Serialize};

use rinkside_core::{CartId, CartStatus, Cents, ItemId, UserId};

use super::item::EquipmentItem;

/// One entry in a cart, identified by (item id, size).
///
/// Name, description, price and image are denormalized snapshots taken
/// at add-time: later catalog changes do not affect lines already in a
/// cart or recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog item this line was created from.
    pub id: ItemId,
    /// Item name at add-time.
    pub name: String,
    /// Item description at add-time.
    pub description: String,
    /// Unit price at add-time, in whole cents.
    pub price_in_cents: Cents,
    /// Item image at add-time.
    pub image: String,
    /// Selected size, if the item comes in sizes.
    pub size: Option<String>,
    /// Number of units; always positive.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Cents {
        self.price_in_cents * self.quantity
    }

    /// Whether this line merges with an addition of `item_id` + `size`.
    fn matches(&self, item_id: ItemId, size: Option<&str>) -> bool {
        self.id == item_id && self.size.as_deref() == size
    }
}

/// Sum of `quantity` x unit price over all lines, in whole cents.
#[must_use]
pub fn compute_total(lines: &[CartLine]) -> Cents {
    lines.iter().map(CartLine::line_total).sum()
}

/// A user's shopping cart.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Cart status; the application only ever loads `InProgress` carts.
    pub status: CartStatus,
    /// Ordered line sequence.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Merge an item into the cart.
    ///
    /// If a line with the same (item id, size) already exists its quantity
    /// is incremented in place, saturating at `u32::MAX`; otherwise a new
    /// snapshot line is appended. The quantity must already be validated
    /// as positive by the caller.
    pub fn add_line(&mut self, item: &EquipmentItem, quantity: u32, size: Option<String>) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item.id, size.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price_in_cents: item.price,
            image: item.image.clone(),
            size,
            quantity,
        });
    }

    /// Total price of the cart in whole cents.
    #[must_use]
    pub fn total(&self) -> Cents {
        compute_total(&self.lines)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stick() -> EquipmentItem {
        EquipmentItem {
            id: ItemId::new(1),
            name: "Composite Stick".to_string(),
            description: "Mid-kick composite stick".to_string(),
            price: Cents::new(500),
            image: "sticks/composite.jpg".to_string(),
            sizes: Some(vec!["Junior".to_string(), "Senior".to_string()]),
        }
    }

    fn puck() -> EquipmentItem {
        EquipmentItem {
            id: ItemId::new(2),
            name: "Game Puck".to_string(),
            description: "Official weight game puck".to_string(),
            price: Cents::new(1200),
            image: "pucks/game.jpg".to_string(),
            sizes: None,
        }
    }

    fn empty_cart() -> Cart {
        Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            status: CartStatus::InProgress,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_add_line_appends_snapshot() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, Some("Senior".to_string()));

        assert_eq!(cart.lines.len(), 1);
        let line = cart.lines.first().unwrap();
        assert_eq!(line.id, ItemId::new(1));
        assert_eq!(line.name, "Composite Stick");
        assert_eq!(line.price_in_cents, Cents::new(500));
        assert_eq!(line.size.as_deref(), Some("Senior"));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_line_merges_same_item_and_size() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, Some("Senior".to_string()));
        cart.add_line(&stick(), 3, Some("Senior".to_string()));

        // One line with the summed quantity, never two lines.
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines.first().unwrap().quantity, 5);
    }

    #[test]
    fn test_add_line_merge_saturates_at_max_quantity() {
        let mut cart = empty_cart();
        cart.add_line(&puck(), u32::MAX - 1, None);
        cart.add_line(&puck(), 5, None);

        assert_eq!(cart.lines.first().unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_add_line_same_item_different_size_appends() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 1, Some("Senior".to_string()));
        cart.add_line(&stick(), 1, Some("Junior".to_string()));

        assert_eq!(cart.lines.len(), 2);
    }

    #[test]
    fn test_add_line_leaves_other_lines_unchanged() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, Some("Senior".to_string()));
        cart.add_line(&puck(), 1, None);

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines.first().unwrap().quantity, 2);
        assert_eq!(cart.lines.get(1).unwrap().id, ItemId::new(2));
    }

    #[test]
    fn test_compute_total() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, None);
        cart.add_line(&puck(), 1, None);

        // 2 x 500 + 1 x 1200
        assert_eq!(cart.total(), Cents::new(2200));
        assert_eq!(compute_total(&cart.lines), Cents::new(2200));
    }

    #[test]
    fn test_total_is_snapshot_price_not_catalog_price() {
        let mut item = puck();
        let mut cart = empty_cart();
        cart.add_line(&item, 2, None);

        // A later catalog price change must not affect the cart.
        item.price = Cents::new(9999);

        assert_eq!(cart.total(), Cents::new(2400));
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = empty_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Cents::ZERO);
        assert_eq!(cart.unit_count(), 0);
    }

    #[test]
    fn test_cleared_cart_is_reusable() {
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, None);

        // Clearing empties the lines but the cart itself stays usable.
        cart.lines.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Cents::ZERO);

        cart.add_line(&puck(), 1, None);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total(), Cents::new(1200));
    }

    #[test]
    fn test_cart_line_json_shape() {
        // The JSONB column layout the persistence gateway depends on.
        let mut cart = empty_cart();
        cart.add_line(&stick(), 2, Some("Senior".to_string()));

        let json = serde_json::to_value(&cart.lines).unwrap();
        let line = json.get(0).unwrap();
        assert_eq!(line.get("id").unwrap(), 1);
        assert_eq!(line.get("price_in_cents").unwrap(), 500);
        assert_eq!(line.get("size").unwrap(), "Senior");
        assert_eq!(line.get("quantity").unwrap(), 2);

        let back: Vec<CartLine> = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart.lines);
    }
}
