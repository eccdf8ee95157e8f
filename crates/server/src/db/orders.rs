//! Order repository for database operations.
//!
//! Order creation inserts the order, its items, and the stock decrements in
//! a single transaction so a failed line item never leaves a partial order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use kabelindo_core::{
    CustomerId, OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, Sku,
};

use super::{RepositoryError, map_unique_violation};
use crate::models::{Order, OrderItem, OrderWithItems};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    customer_id: Option<i32>,
    customer_name: String,
    customer_email: String,
    shipping_address: String,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    payment_deadline: Option<DateTime<Utc>>,
    status: OrderStatus,
    subtotal: Decimal,
    shipping_cost: Decimal,
    tax: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            order_number: row.order_number,
            customer_id: row.customer_id.map(CustomerId::new),
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            shipping_address: row.shipping_address,
            payment_method: row.payment_method,
            payment_status: row.payment_status,
            payment_deadline: row.payment_deadline,
            status: row.status,
            subtotal: row.subtotal,
            shipping_cost: row.shipping_cost,
            tax: row.tax,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    sku: String,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
    line_total: Decimal,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let sku = Sku::parse(&row.sku).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid SKU in database: {e}"))
        })?;

        Ok(Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            sku,
            product_name: row.product_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
            line_total: row.line_total,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, order_number, customer_id, customer_name, customer_email, shipping_address, \
     payment_method, payment_status, payment_deadline, status, subtotal, shipping_cost, tax, \
     total, created_at, updated_at";

const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, product_id, sku, product_name, unit_price, quantity, line_total";

/// A fully priced order ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_deadline: Option<DateTime<Utc>>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A priced line item ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub sku: Sku,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Filters for order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM "order"
            WHERE ($1::order_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.status)
        .bind(if filter.limit > 0 { filter.limit } else { 50 })
        .bind(filter.offset.max(0))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an order with its items by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE id = $1"#
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let order: Order = row.into();
        let items = self.items_for(order.id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// Get an order with its items by order number (confirmation lookup).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE order_number = $1"#
        ))
        .bind(order_number)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let order: Order = row.into();
        let items = self.items_for(order.id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_item WHERE order_id = $1 ORDER BY id ASC"
        ))
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create an order with its items, decrementing product stock.
    ///
    /// Runs in one transaction: the order insert, every item insert, and
    /// every stock decrement either all commit or all roll back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number collides or a
    /// product has insufficient stock.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new_order: &NewOrder,
        new_items: &[NewOrderItem],
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO "order" (order_number, customer_id, customer_name, customer_email,
                                 shipping_address, payment_method, payment_deadline,
                                 subtotal, shipping_cost, tax, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&new_order.order_number)
        .bind(new_order.customer_id.map(|c| c.as_i32()))
        .bind(&new_order.customer_name)
        .bind(&new_order.customer_email)
        .bind(&new_order.shipping_address)
        .bind(new_order.payment_method)
        .bind(new_order.payment_deadline)
        .bind(new_order.subtotal)
        .bind(new_order.shipping_cost)
        .bind(new_order.tax)
        .bind(new_order.total)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "order number already exists"))?;

        let order: Order = row.into();
        let mut items = Vec::with_capacity(new_items.len());

        for item in new_items {
            // Guarded decrement: zero rows affected means not enough stock.
            let updated = sqlx::query(
                "UPDATE product SET stock_quantity = stock_quantity - $2, updated_at = NOW()
                 WHERE id = $1 AND stock_quantity >= $2",
            )
            .bind(item.product_id.as_i32())
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for {}",
                    item.sku
                )));
            }

            let line_total = item.unit_price * Decimal::from(item.quantity);
            let item_row = sqlx::query_as::<_, OrderItemRow>(&format!(
                r"
                INSERT INTO order_item (order_id, product_id, sku, product_name, unit_price,
                                        quantity, line_total)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ORDER_ITEM_COLUMNS}
                "
            ))
            .bind(order.id.as_i32())
            .bind(item.product_id.as_i32())
            .bind(item.sku.as_str())
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .bind(line_total)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item_row.try_into()?);
        }

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }

    /// Update an order's status and payment status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE "order"
            SET status = $2, payment_status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(status)
        .bind(payment_status)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete an order by ID; items cascade.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(r#"DELETE FROM "order" WHERE id = $1"#)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
