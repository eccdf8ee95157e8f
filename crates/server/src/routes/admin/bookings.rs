//! Admin service booking management.
//!
//! Mounted under `/api/admin/services` since bookings are what the admin
//! manages for the services offering.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use kabelindo_core::{BookingId, BookingStatus};

use crate::db::bookings::BookingRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::routes::ok;
use crate::state::AppState;

/// Query parameters for the admin booking listing.
#[derive(Debug, Deserialize)]
pub struct AdminBookingQuery {
    pub status: Option<BookingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/services
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<AdminBookingQuery>,
) -> Result<Json<serde_json::Value>> {
    let bookings = BookingRepository::new(state.pool())
        .list(
            query.status,
            query.limit.unwrap_or(50),
            query.offset.unwrap_or(0),
        )
        .await?;

    Ok(ok(bookings))
}

/// GET /api/admin/services/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the booking doesn't exist.
pub async fn show(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let booking = BookingRepository::new(state.pool())
        .get(BookingId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_owned()))?;

    Ok(ok(booking))
}

/// Status update for a booking.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: BookingStatus,
}

/// PUT /api/admin/services/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the booking doesn't exist.
pub async fn update_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<serde_json::Value>> {
    let booking = BookingRepository::new(state.pool())
        .update_status(BookingId::new(id), body.status)
        .await?;

    tracing::info!(booking_id = id, by = %staff.username, "Booking status updated");

    Ok(ok(booking))
}

/// DELETE /api/admin/services/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the booking doesn't exist.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = BookingRepository::new(state.pool())
        .delete(BookingId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("booking not found".to_owned()));
    }

    tracing::info!(booking_id = id, by = %staff.username, "Booking deleted");

    Ok(ok(serde_json::Value::Null))
}
