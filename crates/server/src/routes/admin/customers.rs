//! Admin customer management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use kabelindo_core::{CustomerId, Email};

use crate::db::customers::{CustomerInput, CustomerRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::routes::ok;
use crate::state::AppState;

/// Query parameters for the admin customer listing.
#[derive(Debug, Deserialize)]
pub struct AdminCustomerQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Customer fields for create and update.
#[derive(Debug, Deserialize)]
pub struct CustomerBody {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerBody {
    fn into_input(self) -> Result<CustomerInput> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }
        let email = Email::parse(&self.email)
            .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;

        Ok(CustomerInput {
            name: self.name.trim().to_owned(),
            email,
            phone: self.phone,
            address: self.address,
        })
    }
}

/// GET /api/admin/customers
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<AdminCustomerQuery>,
) -> Result<Json<serde_json::Value>> {
    let customers = CustomerRepository::new(state.pool())
        .list(
            query.q.as_deref(),
            query.limit.unwrap_or(50),
            query.offset.unwrap_or(0),
        )
        .await?;

    Ok(ok(customers))
}

/// GET /api/admin/customers/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the customer doesn't exist.
pub async fn show(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let customer = CustomerRepository::new(state.pool())
        .get(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("customer not found".to_owned()))?;

    Ok(ok(customer))
}

/// POST /api/admin/customers
///
/// # Errors
///
/// Returns `AppError::Validation` for bad fields, `AppError::Conflict` for a
/// duplicate email.
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<CustomerBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let customer = CustomerRepository::new(state.pool()).create(&input).await?;

    Ok(ok(customer))
}

/// PUT /api/admin/customers/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the customer doesn't exist,
/// `AppError::Conflict` for a duplicate email.
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CustomerBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let customer = CustomerRepository::new(state.pool())
        .update(CustomerId::new(id), &input)
        .await?;

    Ok(ok(customer))
}

/// DELETE /api/admin/customers/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the customer doesn't exist.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = CustomerRepository::new(state.pool())
        .delete(CustomerId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("customer not found".to_owned()));
    }

    tracing::info!(customer_id = id, by = %staff.username, "Customer deleted");

    Ok(ok(serde_json::Value::Null))
}
