//! Admin order management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use kabelindo_core::{OrderId, OrderStatus, PaymentStatus};

use crate::db::orders::{OrderFilter, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::routes::ok;
use crate::state::AppState;

/// Query parameters for the admin order listing.
#[derive(Debug, Deserialize)]
pub struct AdminOrderQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/orders
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<AdminOrderQuery>,
) -> Result<Json<serde_json::Value>> {
    let filter = OrderFilter {
        status: query.status,
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let orders = OrderRepository::new(state.pool()).list(&filter).await?;
    Ok(ok(orders))
}

/// GET /api/admin/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist.
pub async fn show(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_owned()))?;

    Ok(ok(order))
}

/// Status update for an order.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

/// PUT /api/admin/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist.
pub async fn update_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<serde_json::Value>> {
    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), body.status, body.payment_status)
        .await?;

    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        by = %staff.username,
        "Order status updated"
    );

    Ok(ok(order))
}

/// DELETE /api/admin/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("order not found".to_owned()));
    }

    tracing::info!(order_id = id, by = %staff.username, "Order deleted");

    Ok(ok(serde_json::Value::Null))
}
