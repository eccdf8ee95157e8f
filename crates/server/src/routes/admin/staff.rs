//! Staff account management. Creation and deletion are super-admin only.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use kabelindo_core::{Email, StaffId, StaffRole};

use crate::db::staff_users::{NewStaffUser, StaffUserRepository};
use crate::error::{AppError, Result};
use crate::middleware::{RequireStaff, RequireSuperAdmin};
use crate::routes::ok;
use crate::services::auth::{hash_password, validate_password};
use crate::state::AppState;

/// GET /api/admin/staff
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let staff = StaffUserRepository::new(state.pool()).list().await?;
    Ok(ok(staff))
}

/// New staff account request.
#[derive(Debug, Deserialize)]
pub struct CreateStaffBody {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: StaffRole,
}

/// POST /api/admin/staff
///
/// # Errors
///
/// Returns `AppError::Validation` for bad fields, `AppError::Conflict` for a
/// duplicate username or email.
pub async fn create(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateStaffBody>,
) -> Result<Json<serde_json::Value>> {
    let username = body.username.trim().to_owned();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_owned()));
    }
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    validate_password(&body.password)?;

    let input = NewStaffUser {
        username,
        email,
        role: body.role,
        password_hash: hash_password(&body.password)?,
    };

    let user = StaffUserRepository::new(state.pool()).create(&input).await?;

    tracing::info!(username = %user.username, role = %user.role, by = %admin.username, "Staff user created");

    Ok(ok(user))
}

/// DELETE /api/admin/staff/{id}
///
/// A super admin cannot delete their own account.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the user doesn't exist.
pub async fn delete(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let id = StaffId::new(id);
    if id == admin.id {
        return Err(AppError::Validation(
            "cannot delete your own account".to_owned(),
        ));
    }

    let deleted = StaffUserRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound("staff user not found".to_owned()));
    }

    tracing::info!(staff_id = %id, by = %admin.username, "Staff user deleted");

    Ok(ok(serde_json::Value::Null))
}
