//! Authentication service.
//!
//! Password hashing uses Argon2 with an explicitly stored per-user salt:
//! the salt is generated fresh for every hash, stored in its own column,
//! and verification recomputes the hash with the stored salt and compares
//! for exact equality. Hashing is CPU-bound, so services run it on the
//! blocking pool.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use rinkside_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{CurrentUser, User};

/// Authentication service.
///
/// Handles signup, login, and password changes.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty.
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let email = Email::parse(email)?;
        let (hash, salt) = hash_password_blocking(password.to_owned()).await?;

        let user = self
            .users
            .create(&email, &hash, &salt)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// On success returns the session payload for the user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account has the email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        // An unparseable identifier cannot match any stored account.
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::UserNotFound);
        };

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = verify_password_blocking(
            password.to_owned(),
            user.password_hash.clone(),
            user.password_salt.clone(),
        )
        .await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }

    /// Change a logged-in user's password.
    ///
    /// Re-hashes with a fresh salt; the old hash and salt are replaced
    /// together.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty.
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidCredentials` if `current` is wrong.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current: &str,
        next: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        if current.is_empty() || next.is_empty() || confirm.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if next != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = verify_password_blocking(
            current.to_owned(),
            user.password_hash,
            user.password_salt,
        )
        .await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let (hash, salt) = hash_password_blocking(next.to_owned()).await?;
        self.users.update_password(user_id, &hash, &salt).await?;

        Ok(())
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Hash a password with a freshly generated salt.
///
/// Returns the full Argon2 hash string and the salt that produced it.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` on hashing failure.
pub fn hash_password(password: &str) -> Result<(String, String), AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?
        .to_string();

    Ok((hash, salt.as_str().to_owned()))
}

/// Verify a password against a stored hash and salt.
///
/// Recomputes the hash with the stored salt; deterministic given
/// salt+plaintext, so exact string equality decides the match.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the salt is invalid or hashing fails.
pub fn verify_password(
    password: &str,
    stored_hash: &str,
    stored_salt: &str,
) -> Result<bool, AuthError> {
    let salt = SaltString::from_b64(stored_salt).map_err(|_| AuthError::PasswordHash)?;
    let argon2 = Argon2::default();

    let recomputed = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?
        .to_string();

    Ok(recomputed == stored_hash)
}

/// Run [`hash_password`] on the blocking pool.
async fn hash_password_blocking(password: String) -> Result<(String, String), AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

/// Run [`verify_password`] on the blocking pool.
async fn verify_password_blocking(
    password: String,
    stored_hash: String,
    stored_salt: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash, &stored_salt))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let (hash, salt) = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash, &salt).unwrap());
    }

    #[test]
    fn test_verify_rejects_other_plaintext() {
        let (hash, salt) = hash_password("pw1").unwrap();
        assert!(!verify_password("pw2", &hash, &salt).unwrap());
        assert!(!verify_password("", &hash, &salt).unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let (hash_a, salt_a) = hash_password("same password").unwrap();
        let (hash_b, salt_b) = hash_password("same password").unwrap();

        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_deterministic_given_stored_salt() {
        let (hash, salt) = hash_password("pw1").unwrap();
        // Recomputing with the stored salt reproduces the hash exactly.
        assert!(verify_password("pw1", &hash, &salt).unwrap());
        assert!(verify_password("pw1", &hash, &salt).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_salt() {
        let (hash, _) = hash_password("pw1").unwrap();
        assert!(matches!(
            verify_password("pw1", &hash, "not a salt!"),
            Err(AuthError::PasswordHash)
        ));
    }
}
