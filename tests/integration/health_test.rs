//! Health endpoints and cross-cutting middleware.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_ok() {
    let app = TestApp::new().await;
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "OK");
    assert_eq!(response.body["message"], "Al Barid Logistics API is running");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["databaseType"], "memory");
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let app = TestApp::new().await;
    app.store.set_offline(true);

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "ERROR");
    assert_eq!(response.body["message"], "Database connection failed");
    assert_eq!(response.body["database"], "disconnected");

    let tracking = app.get("/tracking/AB1234567890123").await;
    assert_eq!(tracking.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_detailed_health_counts_degraded_reads() {
    let app = TestApp::without_indexes().await;
    app.get("/reviews").await;

    let response = app.get("/health/detailed").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "DEGRADED");
    assert_eq!(response.body["degradedReads"]["reviews"], 1);
    assert_eq!(response.body["degradedReads"]["trackings"], 0);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::new().await;
    let response = app.get("/health").await;
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "DENY");
    assert!(response.headers.contains_key("strict-transport-security"));
}

#[tokio::test]
async fn test_contact_relay() {
    let app = TestApp::new().await;

    let ok = app
        .post(
            "/contact",
            json!({
                "name": "Omar",
                "email": "omar@example.com",
                "subject": "Bulk rates",
                "message": "Do you offer monthly contracts?"
            }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["success"], true);
    assert_eq!(ok.body["message"], "Message received successfully");

    let bad_email = app
        .post(
            "/contact",
            json!({
                "name": "Omar",
                "email": "omar-at-example",
                "subject": "Bulk rates",
                "message": "Hello"
            }),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["error"], "Invalid email format");

    let missing = app
        .post("/contact", json!({ "name": "Omar", "email": "omar@example.com" }))
        .await;
    assert_eq!(missing.body["error"], "Missing required fields");
}
