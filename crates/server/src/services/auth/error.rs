//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or email failed basic validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid credentials (wrong password or unknown user).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Too many failed attempts for this username.
    #[error("account locked, retry in {retry_after_secs}s")]
    LockedOut { retry_after_secs: u64 },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
