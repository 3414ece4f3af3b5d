//! Shipment creation and lookup.

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::helpers::{TestApp, shipment_body};

fn parse(value: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("not a string"))
        .expect("not RFC 3339")
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let app = TestApp::new().await;
    let input = shipment_body("standard");

    let created = app.post("/shipments", input.clone()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Shipment created successfully");

    let code = created.body["trackingNumber"].as_str().unwrap();
    assert!(code.starts_with("AB"));
    assert_eq!(code.len(), 15);
    assert_eq!(created.body["shipment"]["_id"], code);

    let fetched = app.get(&format!("/shipments/{code}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    for field in ["sender", "receiver", "packageDetails", "deliveryOptions"] {
        assert_eq!(fetched.body[field], input[field], "{field} differs");
    }
    assert_eq!(fetched.body["status"], "Pending");
    assert_eq!(fetched.body["currentLocation"], "Dubai, UAE");

    let tracking = app.get(&format!("/tracking/{code}")).await;
    let history = tracking.body["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["description"], "Shipment created and collected");
}

#[tokio::test]
async fn test_estimated_delivery_depends_on_service() {
    let app = TestApp::new().await;

    for (service, days) in [("express", 2), ("standard", 5)] {
        let created = app.post("/shipments", shipment_body(service)).await;
        let shipment = &created.body["shipment"];
        let eta = parse(&shipment["estimatedDelivery"]) - parse(&shipment["createdAt"]);
        assert_eq!(eta, Duration::days(days), "{service}");
    }
}

#[tokio::test]
async fn test_tracking_numbers_are_distinct() {
    let app = TestApp::new().await;
    let mut seen = std::collections::HashSet::new();
    for _ in 0..20 {
        assert!(seen.insert(app.create_shipment("standard").await));
    }
}

#[tokio::test]
async fn test_lookup_ignores_case() {
    let app = TestApp::new().await;
    let code = app.create_shipment("express").await;

    let upper = app.get(&format!("/shipments/{code}")).await;
    let lower = app.get(&format!("/shipments/{}", code.to_lowercase())).await;
    assert_eq!(lower.status, StatusCode::OK);
    assert_eq!(upper.body, lower.body);

    let tracking = app.get(&format!("/tracking/{}", code.to_lowercase())).await;
    assert_eq!(tracking.status, StatusCode::OK);
    assert_eq!(tracking.body["trackingNumber"], code);
}

#[tokio::test]
async fn test_missing_sections_are_rejected() {
    let app = TestApp::new().await;
    let mut body = shipment_body("standard");
    body.as_object_mut().unwrap().remove("receiver");

    let response = app.post("/shipments", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing required fields");
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .post("/shipments", json!({ "sender": "not an object" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_unknown_shipment() {
    let app = TestApp::new().await;
    let response = app.get("/shipments/AB0000000000000").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Shipment not found");
}
