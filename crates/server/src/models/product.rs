//! Product catalog model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kabelindo_core::{CategoryId, ProductId, Sku};

/// A catalog product (router, switch, access point, cabling, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: Sku,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    /// Unit price in whole rupiah.
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    /// Inactive products are hidden from the storefront but kept for order history.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
