//! Staff authentication service.
//!
//! Username + argon2id password verification against the staff directory.
//! Deliberately minimal: no lockout, no rate limiting, no second factor.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use crate::db::StaffRepository;
use crate::models::staff::StaffAccount;

/// Authentication service over the staff directory.
pub struct AuthService<'a> {
    staff: StaffRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            staff: StaffRepository::new(pool),
        }
    }

    /// Authenticate a staff member by username and password.
    ///
    /// An unknown username and a wrong password both collapse into
    /// `AuthError::InvalidCredentials`, so a caller cannot tell which
    /// factor failed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on a failed login and
    /// `AuthError::Repository` when the directory cannot be read.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<StaffAccount, AuthError> {
        let account = self
            .staff
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;

        Ok(account)
    }
}

/// Hash a password using Argon2id.
///
/// Used by the CLI when inserting staff accounts.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("caja1").unwrap();
        assert!(verify_password("caja1", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("caja1").unwrap();
        assert!(matches!(
            verify_password("caja2", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_reads_as_invalid_credentials() {
        assert!(matches!(
            verify_password("caja1", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
