//! Checkout service.
//!
//! Prices a cart from database prices (never client-supplied ones), applies
//! the shipping and tax rules, and persists the order transactionally.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use kabelindo_core::{Email, PaymentMethod, ProductId};

use crate::config::BankConfig;
use crate::db::customers::CustomerRepository;
use crate::db::orders::{NewOrder, NewOrderItem, OrderRepository};
use crate::db::products::ProductRepository;
use crate::error::AppError;
use crate::models::OrderWithItems;
use crate::pricing::{
    OrderNumberGenerator, PaymentInstructions, bank_transfer_deadline, is_cod_available,
    payment_instructions, shipping_cost, tax,
};

/// A cart line as submitted by the client. Prices come from the database.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Checkout details submitted by the client.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartItem>,
}

/// Price breakdown for a cart before the order is placed.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// A placed order together with how to pay for it.
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    #[serde(flatten)]
    pub order: OrderWithItems,
    pub payment_instructions: PaymentInstructions,
}

/// Checkout service tying the pricing rules to persistence.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    order_numbers: &'a OrderNumberGenerator,
    bank: &'a BankConfig,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        order_numbers: &'a OrderNumberGenerator,
        bank: &'a BankConfig,
    ) -> Self {
        Self {
            pool,
            order_numbers,
            bank,
        }
    }

    /// Price a cart against current database prices.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the cart is empty, a quantity is
    /// non-positive, or a product is unknown or inactive.
    pub async fn quote(&self, items: &[CartItem], address: &str) -> Result<Quote, AppError> {
        let priced = self.price_items(items).await?;
        let subtotal: Decimal = priced
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();

        Ok(build_quote(subtotal, address))
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an invalid cart, email, or COD
    /// outside the delivery area.
    /// Returns `AppError::Conflict` if a product runs out of stock.
    pub async fn create(&self, request: &CheckoutRequest) -> Result<PlacedOrder, AppError> {
        if request.customer_name.trim().is_empty() {
            return Err(AppError::Validation("customer name is required".to_owned()));
        }
        if request.shipping_address.trim().is_empty() {
            return Err(AppError::Validation(
                "shipping address is required".to_owned(),
            ));
        }
        let email = Email::parse(&request.customer_email)
            .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;

        if request.payment_method == PaymentMethod::Cod
            && !is_cod_available(&request.shipping_address)
        {
            return Err(AppError::Validation(
                "cash on delivery is only available in Jakarta".to_owned(),
            ));
        }

        let priced = self.price_items(&request.items).await?;
        let subtotal: Decimal = priced
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();
        let quote = build_quote(subtotal, &request.shipping_address);

        // Link an existing customer record by email if there is one.
        let customer_id = CustomerRepository::new(self.pool)
            .get_by_email(&email)
            .await?
            .map(|c| c.id);

        let order_number = self.order_numbers.next();
        let payment_deadline = match request.payment_method {
            PaymentMethod::BankTransfer => Some(bank_transfer_deadline(chrono::Utc::now())),
            PaymentMethod::Cod => None,
        };

        let new_order = NewOrder {
            order_number,
            customer_id,
            customer_name: request.customer_name.trim().to_owned(),
            customer_email: email.as_str().to_owned(),
            shipping_address: request.shipping_address.trim().to_owned(),
            payment_method: request.payment_method,
            payment_deadline,
            subtotal: quote.subtotal,
            shipping_cost: quote.shipping_cost,
            tax: quote.tax,
            total: quote.total,
        };

        let order = OrderRepository::new(self.pool)
            .create(&new_order, &priced)
            .await?;

        let instructions = payment_instructions(
            request.payment_method,
            &order.order.order_number,
            order.order.total,
            order.order.payment_deadline,
            self.bank,
        );

        Ok(PlacedOrder {
            order,
            payment_instructions: instructions,
        })
    }

    /// Resolve cart lines into priced order items from current products.
    async fn price_items(&self, items: &[CartItem]) -> Result<Vec<NewOrderItem>, AppError> {
        if items.is_empty() {
            return Err(AppError::Validation("cart is empty".to_owned()));
        }

        let products = ProductRepository::new(self.pool);
        let mut priced = Vec::with_capacity(items.len());

        for item in items {
            if item.quantity <= 0 {
                return Err(AppError::Validation("quantity must be positive".to_owned()));
            }

            let product = products.get(item.product_id).await?.ok_or_else(|| {
                AppError::Validation(format!("unknown product {}", item.product_id))
            })?;

            if !product.is_active {
                return Err(AppError::Validation(format!(
                    "product {} is unavailable",
                    product.sku
                )));
            }

            priced.push(NewOrderItem {
                product_id: product.id,
                sku: product.sku,
                product_name: product.name,
                unit_price: product.price,
                quantity: item.quantity,
            });
        }

        Ok(priced)
    }
}

fn build_quote(subtotal: Decimal, address: &str) -> Quote {
    let shipping = shipping_cost(address);
    let tax_amount = tax(subtotal);

    Quote {
        subtotal,
        shipping_cost: shipping,
        tax: tax_amount,
        total: subtotal + shipping + tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_totals_add_up() {
        let quote = build_quote(Decimal::from(2_500_000), "Jl. A, Bandung");
        assert_eq!(quote.subtotal, Decimal::from(2_500_000));
        assert_eq!(quote.shipping_cost, Decimal::from(50_000));
        assert_eq!(quote.tax, Decimal::from(275_000));
        assert_eq!(quote.total, Decimal::from(2_825_000));
    }

    #[test]
    fn test_quote_jakarta_ships_free() {
        let quote = build_quote(Decimal::from(100_000), "Jl. Sudirman, Jakarta Pusat");
        assert_eq!(quote.shipping_cost, Decimal::ZERO);
        assert_eq!(quote.total, Decimal::from(111_000));
    }
}
