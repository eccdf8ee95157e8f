//! Admin product management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use kabelindo_core::{CategoryId, ProductId, Sku};

use crate::db::products::{ProductFilter, ProductInput, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::routes::ok;
use crate::state::AppState;

/// Query parameters for the admin product listing.
#[derive(Debug, Deserialize)]
pub struct AdminProductQuery {
    pub q: Option<String>,
    pub category: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Product fields for create and update.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

impl ProductBody {
    fn into_input(self) -> Result<ProductInput> {
        let sku = Sku::parse(&self.sku)
            .map_err(|e| AppError::Validation(format!("invalid SKU: {e}")))?;

        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }
        if self.price.is_sign_negative() {
            return Err(AppError::Validation("price must be non-negative".to_owned()));
        }
        if self.stock_quantity < 0 {
            return Err(AppError::Validation(
                "stock quantity must be non-negative".to_owned(),
            ));
        }

        Ok(ProductInput {
            sku,
            name: self.name.trim().to_owned(),
            description: self.description,
            category_id: self.category_id.map(CategoryId::new),
            price: self.price,
            stock_quantity: self.stock_quantity,
            image_url: self.image_url,
            is_active: self.is_active,
        })
    }
}

/// GET /api/admin/products
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<serde_json::Value>> {
    let filter = ProductFilter {
        q: query.q,
        category_id: query.category.map(CategoryId::new),
        active_only: false,
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(ok(products))
}

/// GET /api/admin/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist.
pub async fn show(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    Ok(ok(product))
}

/// POST /api/admin/products
///
/// # Errors
///
/// Returns `AppError::Validation` for bad fields, `AppError::Conflict` for a
/// duplicate SKU.
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(sku = %product.sku, by = %staff.username, "Product created");

    Ok(ok(product))
}

/// PUT /api/admin/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist,
/// `AppError::Conflict` for a duplicate SKU.
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;

    Ok(ok(product))
}

/// DELETE /api/admin/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("product not found".to_owned()));
    }

    tracing::info!(product_id = id, by = %staff.username, "Product deleted");

    Ok(ok(serde_json::Value::Null))
}
