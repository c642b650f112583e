//! Database operations for storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `hockey_equipment` - The catalog; read-only, seeded by migration
//! - `user_info` - User accounts (email + password hash/salt)
//! - `shopping_carts` - One row per cart; lines live in a JSONB column
//! - `orders` - Completed purchases with a JSONB line snapshot
//! - `session` - Tower-sessions storage (managed by the session store)
//!
//! The JSONB cart-line columns are (de)serialized here and nowhere else;
//! handlers and services only ever see `Vec<CartLine>`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run at
//! startup via `sqlx::migrate!`.

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use carts::CartRepository;
pub use catalog::CatalogRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
