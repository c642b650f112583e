//! Service layer: auth, cart, and order operations.
//!
//! Services own the domain rules and sit between the route handlers and
//! the repositories. Each one borrows the shared `PgPool` through its
//! repositories, so handlers construct them per-request.

pub mod auth;
pub mod cart;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use orders::{OrderError, OrderService};
