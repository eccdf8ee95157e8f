//! Staff user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a staff user with a generated password
//! kabelindo-cli staff create -u admin -e admin@kabelindo.id -r super_admin
//!
//! # Reset a password (username or email)
//! kabelindo-cli staff set-password -u admin
//! ```

use rand::Rng;
use rand::distr::Alphanumeric;

use kabelindo_core::{Email, StaffRole};
use kabelindo_server::db::staff_users::{NewStaffUser, StaffUserRepository};
use kabelindo_server::services::auth::{hash_password, validate_password};

use super::{CommandError, connect};

/// Length of generated passwords.
const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Create a new staff user.
///
/// When `password` is `None` a random password is generated and printed once.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` for a bad role, email, or password.
pub async fn create(
    username: &str,
    email: &str,
    role: &str,
    password: Option<&str>,
) -> Result<i32, CommandError> {
    let role: StaffRole = role
        .parse()
        .map_err(|_| CommandError::InvalidInput(format!("invalid role: {role}")))?;

    let email = Email::parse(email)
        .map_err(|e| CommandError::InvalidInput(format!("invalid email: {e}")))?;

    let username = username.trim();
    if username.is_empty() {
        return Err(CommandError::InvalidInput("username is required".into()));
    }

    let (password, generated) = match password {
        Some(p) => (p.to_owned(), false),
        None => (generate_password(), true),
    };
    validate_password(&password).map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let password_hash =
        hash_password(&password).map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;

    tracing::info!("Creating staff user: {} ({})", username, role);

    let user = StaffUserRepository::new(&pool)
        .create(&NewStaffUser {
            username: username.to_owned(),
            email,
            role,
            password_hash,
        })
        .await
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    tracing::info!(
        "Staff user created! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );

    if generated {
        #[allow(clippy::print_stdout)]
        {
            println!("Generated password (store it now, it is not saved): {password}");
        }
    }

    Ok(user.id.as_i32())
}

/// Reset a staff user's password. The identifier matches username or email.
///
/// When `password` is `None` a random password is generated and printed once.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` for a bad password or an unknown user.
pub async fn set_password(identifier: &str, password: Option<&str>) -> Result<(), CommandError> {
    let (password, generated) = match password {
        Some(p) => (p.to_owned(), false),
        None => (generate_password(), true),
    };
    validate_password(&password).map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let password_hash =
        hash_password(&password).map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;
    let repository = StaffUserRepository::new(&pool);

    let (user, _) = repository
        .get_by_identifier(identifier)
        .await
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?
        .ok_or_else(|| {
            CommandError::InvalidInput(format!("no staff user matches {identifier}"))
        })?;

    repository
        .update_password_hash(user.id, &password_hash)
        .await
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    tracing::info!("Password updated for {} (ID: {})", user.username, user.id);

    if generated {
        #[allow(clippy::print_stdout)]
        {
            println!("Generated password (store it now, it is not saved): {password}");
        }
    }

    Ok(())
}

/// Generate a random alphanumeric password.
fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_is_long_enough() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_set_password_rejects_short_password() {
        // Validation runs before any database connection is attempted.
        let err = set_password("admin", Some("short")).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidInput(_)));
    }
}
