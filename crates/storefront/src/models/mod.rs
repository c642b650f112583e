//! Domain models for storefront.
//!
//! These types represent validated domain objects separate from database
//! row types.

pub mod cart;
pub mod item;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine, compute_total};
pub use item::EquipmentItem;
pub use order::Order;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
