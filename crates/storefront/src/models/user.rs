//! User domain types.

use chrono::{DateTime, Utc};

use rinkside_core::{Email, UserId};

/// A storefront user (domain type).
///
/// The password hash and salt travel together: the salt is stored in its
/// own column so verification can recompute the hash exactly as it was
/// produced at signup.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// Salt used to produce `password_hash`.
    pub password_salt: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
