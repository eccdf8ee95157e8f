//! Product repository for database operations.
//!
//! Queries use runtime-checked `sqlx::query_as` with explicit row structs
//! converted into domain models via `TryFrom`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use kabelindo_core::{CategoryId, ProductId, Sku};

use super::{RepositoryError, map_unique_violation};
use crate::models::Product;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    sku: String,
    name: String,
    description: Option<String>,
    category_id: Option<i32>,
    price: Decimal,
    stock_quantity: i32,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let sku = Sku::parse(&row.sku).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid SKU in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            sku,
            name: row.name,
            description: row.description,
            category_id: row.category_id.map(CategoryId::new),
            price: row.price,
            stock_quantity: row.stock_quantity,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, category_id, price, stock_quantity, image_url, is_active, \
     created_at, updated_at";

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub sku: Sku,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Filters for product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name or SKU.
    pub q: Option<String>,
    pub category_id: Option<CategoryId>,
    /// Storefront listings hide inactive products; admin sees all.
    pub active_only: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let limit = if filter.limit > 0 { filter.limit } else { 50 };

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM product
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR sku ILIKE '%' || $1 || '%')
              AND ($2::int IS NULL OR category_id = $2)
              AND (NOT $3 OR is_active)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "
        ))
        .bind(filter.q.as_deref())
        .bind(filter.category_id.map(|c| c.as_i32()))
        .bind(filter.active_only)
        .bind(limit)
        .bind(filter.offset.max(0))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO product (sku, name, description, category_id, price, stock_quantity, image_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(input.sku.as_str())
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.category_id.map(|c| c.as_i32()))
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.image_url.as_deref())
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "SKU already exists"))?;

        row.try_into()
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new SKU already exists.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE product
            SET sku = $2, name = $3, description = $4, category_id = $5, price = $6,
                stock_quantity = $7, image_url = $8, is_active = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(input.sku.as_str())
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.category_id.map(|c| c.as_i32()))
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.image_url.as_deref())
        .bind(input.is_active)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "SKU already exists"))?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a product by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
