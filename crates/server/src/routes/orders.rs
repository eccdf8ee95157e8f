//! Public order endpoints.
//!
//! `POST /api/orders` takes an `operation` field and dispatches to the
//! matching pricing or checkout action, mirroring how the storefront client
//! asks one endpoint for shipping quotes, tax, COD availability, and order
//! placement.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use kabelindo_core::{PaymentMethod, ProductId, format_rupiah};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::pricing::{is_cod_available, shipping_cost, tax};
use crate::routes::ok;
use crate::services::orders::{CartItem, CheckoutRequest, CheckoutService};
use crate::state::AppState;

/// A cart line in a checkout request.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub product_id: i32,
    pub quantity: i32,
}

/// Checkout payload for `operation: create`.
#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<ItemPayload>,
}

/// Operations accepted by `POST /api/orders`.
#[derive(Debug, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OrderOperation {
    /// Quote shipping cost for an address.
    Shipping { address: String },
    /// Compute PPN tax for a subtotal.
    Tax { subtotal: Decimal },
    /// Check cash-on-delivery availability for an address.
    Cod { address: String },
    /// Place an order.
    Create(CreatePayload),
}

/// POST /api/orders
///
/// # Errors
///
/// Returns `AppError::Validation` for bad payloads, `AppError::Conflict`
/// when stock runs out during checkout.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(operation): Json<OrderOperation>,
) -> Result<Json<serde_json::Value>> {
    match operation {
        OrderOperation::Shipping { address } => {
            let cost = shipping_cost(&address);
            Ok(ok(json!({
                "shipping_cost": cost,
                "shipping_cost_display": format_rupiah(cost),
            })))
        }
        OrderOperation::Tax { subtotal } => {
            if subtotal.is_sign_negative() {
                return Err(AppError::Validation(
                    "subtotal must be non-negative".to_owned(),
                ));
            }
            let tax_amount = tax(subtotal);
            Ok(ok(json!({
                "tax": tax_amount,
                "tax_display": format_rupiah(tax_amount),
            })))
        }
        OrderOperation::Cod { address } => Ok(ok(json!({
            "cod_available": is_cod_available(&address),
        }))),
        OrderOperation::Create(payload) => {
            let request = CheckoutRequest {
                customer_name: payload.customer_name,
                customer_email: payload.customer_email,
                shipping_address: payload.shipping_address,
                payment_method: payload.payment_method,
                items: payload
                    .items
                    .into_iter()
                    .map(|i| CartItem {
                        product_id: ProductId::new(i.product_id),
                        quantity: i.quantity,
                    })
                    .collect(),
            };

            let checkout = CheckoutService::new(
                state.pool(),
                state.order_numbers(),
                &state.config().bank,
            );
            let placed = checkout.create(&request).await?;

            tracing::info!(
                order_number = %placed.order.order.order_number,
                total = %placed.order.order.total,
                "Order placed"
            );

            Ok(ok(placed))
        }
    }
}

/// GET /api/orders/{order_number}
///
/// Order confirmation lookup by the customer-facing order number.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no order has that number.
pub async fn show(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let order = OrderRepository::new(state.pool())
        .get_by_order_number(&order_number)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_owned()))?;

    Ok(ok(order))
}
