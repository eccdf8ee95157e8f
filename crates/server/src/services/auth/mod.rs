//! Staff authentication service.
//!
//! Verifies argon2 password hashes and enforces a per-username lockout of
//! [`throttle::MAX_FAILURES`] failed attempts per [`throttle::LOCKOUT_WINDOW`].

mod error;
mod throttle;

pub use error::AuthError;
pub use throttle::{LOCKOUT_WINDOW, LoginThrottle, MAX_FAILURES};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use crate::db::staff_users::StaffUserRepository;
use crate::models::StaffUser;

/// Minimum password length for new staff accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Staff authentication service.
pub struct AuthService<'a> {
    staff: StaffUserRepository<'a>,
    throttle: &'a LoginThrottle,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, throttle: &'a LoginThrottle) -> Self {
        Self {
            staff: StaffUserRepository::new(pool),
            throttle,
        }
    }

    /// Log in with a username or email plus password.
    ///
    /// Unknown users and wrong passwords both count as failures against the
    /// identifier and return the same error, so the response doesn't reveal
    /// which usernames exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LockedOut` if the identifier has too many recent failures.
    /// Returns `AuthError::InvalidIdentifier` if the identifier is empty.
    /// Returns `AuthError::InvalidCredentials` if the identifier/password is wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<StaffUser, AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AuthError::InvalidIdentifier(
                "username is required".to_owned(),
            ));
        }

        if let Some(retry_after) = self.throttle.check(identifier) {
            return Err(AuthError::LockedOut {
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }

        let Some((user, password_hash)) = self.staff.get_by_identifier(identifier).await? else {
            self.throttle.record_failure(identifier);
            return Err(AuthError::InvalidCredentials);
        };

        if verify_password(password, &password_hash).is_err() {
            self.throttle.record_failure(identifier);
            return Err(AuthError::InvalidCredentials);
        }

        self.throttle.clear(identifier);
        Ok(user)
    }
}

/// Validate a password meets minimum requirements.
///
/// # Errors
///
/// Returns `AuthError::InvalidIdentifier` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidIdentifier(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id with a fresh random salt.
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
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or the
/// password doesn't match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
