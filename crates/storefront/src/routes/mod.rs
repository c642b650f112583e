//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (equipment catalog)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /item/{id}              - Equipment item detail
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action
//! GET  /logout                 - Logout action
//! GET  /change-password        - Change password page (requires auth)
//! POST /change-password        - Change password action (requires auth)
//!
//! # Account (requires auth)
//! GET  /profile                - Account overview with order history
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /add-to-cart            - Add an item to the cart
//! POST /clear-cart             - Empty the cart
//! POST /complete-purchase      - Record the order and empty the cart
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod home;
pub mod items;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/item/{id}", get(items::show))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout))
        .route(
            "/change-password",
            get(auth::change_password_page).post(auth::change_password),
        )
        // Account
        .route("/profile", get(account::profile))
        // Cart
        .route("/cart", get(cart::show))
        .route("/add-to-cart", post(cart::add))
        .route("/clear-cart", post(cart::clear))
        .route("/complete-purchase", post(cart::complete_purchase))
}
