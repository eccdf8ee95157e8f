//! Integration tests for the admin API.
//!
//! Requires a running server, a migrated database, and a test staff user
//! (see crate docs). Run with:
//! cargo test -p kabelindo-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kabelindo_integration_tests::{base_url, client, staff_client, unwrap_data};

#[tokio::test]
#[ignore = "Requires running server and test staff user"]
async fn test_admin_requires_session() {
    let client = client();

    let resp = client
        .get(format!("{}/api/admin/products", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("unauthorized"));
}

#[tokio::test]
#[ignore = "Requires running server and test staff user"]
async fn test_product_crud_roundtrip() {
    let client = staff_client().await;
    let base = base_url();

    // Create
    let resp = client
        .post(format!("{base}/api/admin/products"))
        .json(&json!({
            "sku": "TEST-CRUD-001",
            "name": "Test Switch",
            "price": 500_000,
            "stock_quantity": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let product = unwrap_data(resp.json::<Value>().await.unwrap());
    let id = product["id"].as_i64().unwrap();

    // Duplicate SKU conflicts
    let resp = client
        .post(format!("{base}/api/admin/products"))
        .json(&json!({
            "sku": "TEST-CRUD-001",
            "name": "Duplicate",
            "price": 1,
            "stock_quantity": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Update
    let resp = client
        .put(format!("{base}/api/admin/products/{id}"))
        .json(&json!({
            "sku": "TEST-CRUD-001",
            "name": "Test Switch v2",
            "price": 550_000,
            "stock_quantity": 8,
            "is_active": false
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(updated["name"], json!("Test Switch v2"));
    assert_eq!(updated["is_active"], json!(false));

    // Inactive products are hidden from the public catalog
    let resp = client
        .get(format!("{base}/api/products/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Delete
    let resp = client
        .delete(format!("{base}/api/admin/products/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/api/admin/products/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and test staff user"]
async fn test_order_status_update() {
    let client = staff_client().await;
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/admin/orders"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let orders = unwrap_data(resp.json::<Value>().await.unwrap());

    let Some(order) = orders.as_array().unwrap().first() else {
        // No orders placed yet; nothing to update.
        return;
    };
    let id = order["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{base}/api/admin/orders/{id}"))
        .json(&json!({ "status": "paid", "payment_status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(updated["status"], json!("paid"));
    assert_eq!(updated["payment_status"], json!("paid"));
}

#[tokio::test]
#[ignore = "Requires running server and super admin test user"]
async fn test_staff_management_requires_super_admin() {
    let client = staff_client().await;
    let base = base_url();

    // The configured test user is a super admin, so creation succeeds.
    let resp = client
        .post(format!("{base}/api/admin/staff"))
        .json(&json!({
            "username": "crud-test-staff",
            "email": "crud-test-staff@kabelindo.id",
            "password": "temporary-password",
            "role": "admin"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = unwrap_data(resp.json::<Value>().await.unwrap());
    let id = created["id"].as_i64().unwrap();

    let resp = client
        .delete(format!("{base}/api/admin/staff/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
