//! Public product catalog endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use kabelindo_core::{CategoryId, ProductId};

use crate::db::products::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::routes::ok;
use crate::state::AppState;

/// Query parameters for product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Case-insensitive substring match on name or SKU.
    pub q: Option<String>,
    /// Category ID filter.
    pub category: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/products
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<serde_json::Value>> {
    let filter = ProductFilter {
        q: query.q,
        category_id: query.category.map(CategoryId::new),
        active_only: true,
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(ok(products))
}

/// GET /api/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist or is inactive.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    Ok(ok(product))
}
