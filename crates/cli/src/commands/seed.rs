//! Seed the database with sample catalog data.
//!
//! Intended for development environments. Inserts run in one transaction so
//! a partial seed never sticks.

use rust_decimal::Decimal;

use super::{CommandError, connect};

struct SeedProduct {
    sku: &'static str,
    name: &'static str,
    description: &'static str,
    category_slug: &'static str,
    price: i64,
    stock: i32,
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Router", "router", "Wired and wireless routers"),
    ("Switch", "switch", "Managed and unmanaged switches"),
    ("Kabel", "kabel", "Network cabling and accessories"),
    ("Access Point", "access-point", "Indoor and outdoor access points"),
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        sku: "RTR-MKT-HEX",
        name: "MikroTik hEX RB750Gr3",
        description: "5-port gigabit ethernet router",
        category_slug: "router",
        price: 899_000,
        stock: 25,
    },
    SeedProduct {
        sku: "SWH-TPL-SG108",
        name: "TP-Link TL-SG108",
        description: "8-port gigabit desktop switch",
        category_slug: "switch",
        price: 385_000,
        stock: 40,
    },
    SeedProduct {
        sku: "KBL-UTP-CAT6-305",
        name: "Kabel UTP Cat6 305m",
        description: "Cat6 UTP cable, 305 meter box",
        category_slug: "kabel",
        price: 1_250_000,
        stock: 12,
    },
    SeedProduct {
        sku: "AP-UBT-U6-LITE",
        name: "Ubiquiti UniFi U6 Lite",
        description: "WiFi 6 indoor access point",
        category_slug: "access-point",
        price: 1_750_000,
        stock: 18,
    },
];

/// Insert the sample categories and products.
///
/// # Errors
///
/// Returns `CommandError::Database` if any insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let mut tx = pool.begin().await?;

    tracing::info!("Seeding categories...");
    for (name, slug, description) in CATEGORIES {
        sqlx::query(
            "INSERT INTO category (name, slug, description)
             VALUES ($1, $2, $3)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .execute(&mut *tx)
        .await?;
    }

    tracing::info!("Seeding products...");
    for product in PRODUCTS {
        sqlx::query(
            "INSERT INTO product (sku, name, description, category_id, price, stock_quantity)
             SELECT $1, $2, $3, c.id, $5, $6
             FROM category c WHERE c.slug = $4
             ON CONFLICT (sku) DO NOTHING",
        )
        .bind(product.sku)
        .bind(product.name)
        .bind(product.description)
        .bind(product.category_slug)
        .bind(Decimal::from(product.price))
        .bind(product.stock)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!("Seed complete!");
    Ok(())
}
