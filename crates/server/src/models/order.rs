//! Order and order item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kabelindo_core::{
    CustomerId, OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, Sku,
};

/// A placed order.
///
/// Customer name/email are denormalized at placement time; `customer_id` is
/// set when the order was placed by a known customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number, e.g. `ORD-483920001`.
    pub order_number: String,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Bank-transfer orders must be paid before this deadline (placement + 24h).
    pub payment_deadline: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    /// Sum of item line totals, whole rupiah.
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    /// PPN at a flat 11% of the subtotal.
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item on an order.
///
/// SKU, name, and unit price are captured at placement time so later catalog
/// edits don't rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub sku: Sku,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
