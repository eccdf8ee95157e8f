//! Authentication extractors for the admin API.
//!
//! Handlers declare their access level by taking one of these extractors.
//! Rejections render as the standard JSON envelope since every surface here
//! is an API, not a page.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use kabelindo_core::StaffRole;

use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires a logged-in back-office user (`admin` or
/// `super_admin`). Logged-in `customer` accounts are rejected with 403.
pub struct RequireStaff(pub CurrentStaff);

/// Extractor that requires a logged-in `super_admin`.
pub struct RequireSuperAdmin(pub CurrentStaff);

/// Extractor that optionally reads the current staff user without rejecting.
pub struct OptionalStaff(pub Option<CurrentStaff>);

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No session or not logged in.
    Unauthorized,
    /// Logged in but the role doesn't allow this.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Login required",
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Insufficient permissions",
            ),
        };

        let body = Json(json!({
            "success": false,
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}

async fn current_staff(parts: &Parts) -> Option<CurrentStaff> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = current_staff(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if !staff.role.is_back_office() {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(staff))
    }
}

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = current_staff(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if staff.role != StaffRole::SuperAdmin {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(staff))
    }
}

impl<S> FromRequestParts<S> for OptionalStaff
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_staff(parts).await))
    }
}

/// Store the current staff user in the session after login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Clear the current staff user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
