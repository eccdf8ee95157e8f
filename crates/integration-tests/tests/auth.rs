//! Integration tests for staff authentication and lockout.
//!
//! Run with: cargo test -p kabelindo-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kabelindo_integration_tests::{base_url, client, staff_client};

#[tokio::test]
#[ignore = "Requires running server and test staff user"]
async fn test_login_logout_me() {
    let client = staff_client().await;
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base}/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/api/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server; locks out the username it uses"]
async fn test_lockout_after_five_failures() {
    let client = client();
    let base = base_url();

    // A username no real account uses, so only this test is affected.
    let login = |password: &'static str| {
        let client = client.clone();
        let base = base.clone();
        async move {
            client
                .post(format!("{base}/api/auth/login"))
                .json(&json!({ "username": "lockout-test-user", "password": password }))
                .send()
                .await
                .unwrap()
        }
    };

    for _ in 0..5 {
        let resp = login("wrong-password").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // Sixth attempt within the window is rejected with a lockout.
    let resp = login("wrong-password").await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("locked_out"));
}
