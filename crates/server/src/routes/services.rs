//! Public service booking endpoints.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use kabelindo_core::Email;

use crate::db::bookings::{BookingInput, BookingRepository};
use crate::error::{AppError, Result};
use crate::models::ServiceType;
use crate::routes::ok;
use crate::state::AppState;

/// GET /api/services
///
/// Lists the service types the company offers.
pub async fn list() -> Json<serde_json::Value> {
    let services: Vec<_> = ServiceType::ALL
        .iter()
        .map(|t| {
            json!({
                "service_type": t,
                "label": t.label(),
            })
        })
        .collect();

    ok(services)
}

/// Booking request submitted by a customer.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_type: ServiceType,
    pub scheduled_date: NaiveDate,
    pub address: String,
    pub notes: Option<String>,
}

/// POST /api/services
///
/// # Errors
///
/// Returns `AppError::Validation` for missing or invalid fields.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<serde_json::Value>> {
    if request.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer name is required".to_owned()));
    }
    if request.customer_phone.trim().is_empty() {
        return Err(AppError::Validation("phone number is required".to_owned()));
    }
    if request.address.trim().is_empty() {
        return Err(AppError::Validation("address is required".to_owned()));
    }
    let email = Email::parse(&request.customer_email)
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;

    let input = BookingInput {
        customer_name: request.customer_name.trim().to_owned(),
        customer_email: email.as_str().to_owned(),
        customer_phone: request.customer_phone.trim().to_owned(),
        service_type: request.service_type,
        scheduled_date: request.scheduled_date,
        address: request.address.trim().to_owned(),
        notes: request.notes,
    };

    let booking = BookingRepository::new(state.pool()).create(&input).await?;
    Ok(ok(booking))
}
