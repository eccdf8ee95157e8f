//! Integration tests for the public storefront API.
//!
//! Requires a running server with a migrated, seeded database.
//! Run with: cargo test -p kabelindo-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kabelindo_integration_tests::{base_url, client, unwrap_data};

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_health_endpoints() {
    let client = client();
    let base = base_url();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_product_listing_and_detail() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let products = unwrap_data(resp.json::<Value>().await.unwrap());
    let products = products.as_array().expect("data should be an array");
    assert!(!products.is_empty(), "seeded catalog should have products");

    let id = products[0]["id"].as_i64().unwrap();
    let resp = client
        .get(format!("{base}/api/products/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let product = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(product["id"].as_i64().unwrap(), id);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_product_is_404_with_envelope() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products/999999", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_order_shipping_quote() {
    let client = client();

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "operation": "shipping",
            "address": "Jl. Sudirman, Jakarta Pusat"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let data = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(data["shipping_cost"], json!("0"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_order_tax_quote() {
    let client = client();

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({ "operation": "tax", "subtotal": 2_500_000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let data = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(data["tax"], json!("275000"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cod_availability_follows_jakarta_rule() {
    let client = client();
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({ "operation": "cod", "address": "Jakarta Selatan" }))
        .send()
        .await
        .unwrap();
    let data = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(data["cod_available"], json!(true));

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({ "operation": "cod", "address": "Jl. A, Bandung" }))
        .send()
        .await
        .unwrap();
    let data = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(data["cod_available"], json!(false));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_checkout_and_confirmation_lookup() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/products"))
        .send()
        .await
        .unwrap();
    let products = unwrap_data(resp.json::<Value>().await.unwrap());
    let product_id = products.as_array().unwrap()[0]["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "operation": "create",
            "customer_name": "Budi Santoso",
            "customer_email": "budi@example.com",
            "shipping_address": "Jl. Thamrin No. 1, Jakarta Pusat",
            "payment_method": "bank_transfer",
            "items": [{ "product_id": product_id, "quantity": 1 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let data = unwrap_data(resp.json::<Value>().await.unwrap());
    let order_number = data["order_number"].as_str().unwrap().to_owned();
    assert!(order_number.starts_with("ORD-"));
    // Jakarta address ships free
    assert_eq!(data["shipping_cost"], json!("0"));
    assert!(data["payment_instructions"]["deadline"].is_string());

    let resp = client
        .get(format!("{base}/api/orders/{order_number}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let found = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(found["order_number"].as_str().unwrap(), order_number);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cod_rejected_outside_jakarta() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/products"))
        .send()
        .await
        .unwrap();
    let products = unwrap_data(resp.json::<Value>().await.unwrap());
    let product_id = products.as_array().unwrap()[0]["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "operation": "create",
            "customer_name": "Siti Rahma",
            "customer_email": "siti@example.com",
            "shipping_address": "Jl. Asia Afrika, Bandung",
            "payment_method": "cod",
            "items": [{ "product_id": product_id, "quantity": 1 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("validation_error"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_service_listing_and_booking() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/services"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let services = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(services.as_array().unwrap().len(), 4);

    let resp = client
        .post(format!("{base}/api/services"))
        .json(&json!({
            "customer_name": "Budi Santoso",
            "customer_email": "budi@example.com",
            "customer_phone": "081234567890",
            "service_type": "installation",
            "scheduled_date": "2026-09-15",
            "address": "Jl. Thamrin No. 1, Jakarta Pusat"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let booking = unwrap_data(resp.json::<Value>().await.unwrap());
    assert_eq!(booking["status"], json!("requested"));
}
