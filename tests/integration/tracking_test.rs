//! Public tracking view and the status projection.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_tracking_view_shape() {
    let app = TestApp::new().await;
    let code = app.create_shipment("express").await;

    let response = app.get(&format!("/tracking/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = &response.body;
    assert_eq!(body["trackingNumber"], code);
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["currentLocation"], "Dubai, UAE");
    assert_eq!(body["packageDetails"]["dimensions"], "30 x 20 x 10 cm");
    assert_eq!(body["deliveryOptions"]["serviceType"], "express");
    assert_eq!(body["estimatedDelivery"].as_str().unwrap().len(), 10);
    assert!(body["history"][0]["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_history_is_oldest_first_and_status_follows_latest_event() {
    let app = TestApp::new().await;
    let code = app.create_shipment("standard").await;

    for (status, location, description) in [
        ("Picked Up", "Dubai, UAE", "Collected from sender"),
        ("In Transit", "Abu Dhabi, UAE", "Departed regional hub"),
    ] {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let response = app
            .admin(
                "PATCH",
                &format!("/admin/shipments/{code}"),
                Some(json!({
                    "status": status,
                    "location": location,
                    "description": description
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let tracking = app.get(&format!("/tracking/{code}")).await;
    let statuses: Vec<&str> = tracking.body["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["Pending", "Picked Up", "In Transit"]);
    assert_eq!(tracking.body["status"], "In Transit");
    assert_eq!(tracking.body["currentLocation"], "Abu Dhabi, UAE");
}

#[tokio::test]
async fn test_history_order_without_indexes() {
    let app = TestApp::without_indexes().await;
    let code = app.create_shipment("standard").await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.admin(
        "PATCH",
        &format!("/admin/shipments/{code}"),
        Some(json!({
            "status": "Out for Delivery",
            "location": "Doha, Qatar",
            "description": "With courier"
        })),
    )
    .await;

    let tracking = app.get(&format!("/tracking/{code}")).await;
    assert_eq!(tracking.status, StatusCode::OK);
    let history = tracking.body["history"].as_array().unwrap();
    assert_eq!(history[0]["status"], "Pending");
    assert_eq!(history[1]["status"], "Out for Delivery");
    assert!(app.metrics.snapshot().trackings >= 1);
}

#[tokio::test]
async fn test_unknown_tracking_number() {
    let app = TestApp::new().await;
    let response = app.get("/tracking/AB9999999999999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Tracking number not found");
}
