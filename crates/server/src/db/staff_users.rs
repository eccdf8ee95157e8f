//! Staff user repository for database operations.
//!
//! Password hashes never leave this module except through
//! [`StaffUserRepository::get_by_identifier`], which the login flow uses
//! for verification.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kabelindo_core::{Email, StaffId, StaffRole};

use super::{RepositoryError, map_unique_violation};
use crate::models::StaffUser;

#[derive(Debug, sqlx::FromRow)]
struct StaffUserRow {
    id: i32,
    username: String,
    email: String,
    role: StaffRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StaffUserRow> for StaffUser {
    type Error = RepositoryError;

    fn try_from(row: StaffUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: StaffId::new(row.id),
            username: row.username,
            email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const STAFF_COLUMNS: &str = "id, username, email, role, created_at, updated_at";

/// Fields accepted when creating a staff user. The hash must already be an
/// encoded argon2 string.
#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub username: String,
    pub email: Email,
    pub role: StaffRole,
    pub password_hash: String,
}

/// Repository for staff user database operations.
pub struct StaffUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffUserRepository<'a> {
    /// Create a new staff user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a staff user by username or email (case-insensitive),
    /// returning the user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<(StaffUser, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct RowWithHash {
            #[sqlx(flatten)]
            user: StaffUserRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, RowWithHash>(&format!(
            "SELECT {STAFF_COLUMNS}, password_hash
             FROM staff_user
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)"
        ))
        .bind(identifier)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((r.user.try_into()?, r.password_hash)))
            .transpose()
    }

    /// Get a staff user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StaffId) -> Result<Option<StaffUser>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffUserRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff_user WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all staff users alphabetically by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<StaffUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, StaffUserRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff_user ORDER BY username ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new staff user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email already exists.
    pub async fn create(&self, input: &NewStaffUser) -> Result<StaffUser, RepositoryError> {
        let row = sqlx::query_as::<_, StaffUserRow>(&format!(
            r"
            INSERT INTO staff_user (username, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {STAFF_COLUMNS}
            "
        ))
        .bind(&input.username)
        .bind(input.email.as_str())
        .bind(input.role)
        .bind(&input.password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username or email already exists"))?;

        row.try_into()
    }

    /// Replace a staff user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_password_hash(
        &self,
        id: StaffId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE staff_user SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a staff user by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the user was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: StaffId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM staff_user WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
