//! Integration tests for Kabelindo.
//!
//! Tests in `tests/` run against a live server and are `#[ignore]`-gated.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and seed a local database, create a super admin
//! cargo run -p kabelindo-cli -- migrate
//! cargo run -p kabelindo-cli -- seed
//! cargo run -p kabelindo-cli -- staff create -u testadmin -e test@kabelindo.id \
//!     -r super_admin -p "integration-secret"
//!
//! # Start the server, then:
//! cargo test -p kabelindo-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `KABELINDO_BASE_URL` - server under test (default `http://localhost:3000`)
//! - `TEST_STAFF_USERNAME` / `TEST_STAFF_PASSWORD` - login for admin API tests

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("KABELINDO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store for session handling.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the configured test staff user and return the session client.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn staff_client() -> Client {
    let username =
        std::env::var("TEST_STAFF_USERNAME").unwrap_or_else(|_| "testadmin".to_string());
    let password =
        std::env::var("TEST_STAFF_PASSWORD").unwrap_or_else(|_| "integration-secret".to_string());

    let client = client();
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Login request failed");

    assert!(
        resp.status().is_success(),
        "Test staff login rejected: {}",
        resp.status()
    );

    client
}

/// Assert the standard success envelope and return its `data` field.
///
/// # Panics
///
/// Panics if the body isn't a success envelope.
#[must_use]
pub fn unwrap_data(body: Value) -> Value {
    assert_eq!(body["success"], json!(true), "expected success envelope");
    body["data"].clone()
}
