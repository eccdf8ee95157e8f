//! Staff authentication endpoints.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::OptionalStaff;
use crate::middleware::auth::{clear_current_staff, set_current_staff};
use crate::models::CurrentStaff;
use crate::routes::ok;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body. The username field also accepts an email address.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// # Errors
///
/// Returns `AppError::Auth` with a 401 for bad credentials or a 429 when
/// the username is locked out.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let auth = AuthService::new(state.pool(), state.login_throttle());
    let user = auth.login(&request.username, &request.password).await?;

    let staff = CurrentStaff {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
    };

    // New session ID on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_current_staff(&session, &staff)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(username = %staff.username, role = %staff.role, "Staff login");

    Ok(ok(staff))
}

/// POST /api/auth/logout
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_staff(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(ok(serde_json::Value::Null))
}

/// GET /api/auth/me
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if nobody is logged in.
pub async fn me(OptionalStaff(staff): OptionalStaff) -> Result<Json<serde_json::Value>> {
    let staff = staff.ok_or_else(|| AppError::Unauthorized("not logged in".to_owned()))?;
    Ok(ok(staff))
}
