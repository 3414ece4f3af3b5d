//! Rate calculator endpoint.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_domestic_standard_quote() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/rates/calculate",
            json!({
                "origin": "Dubai, UAE",
                "destination": "Dubai, UAE",
                "weight": 2,
                "length": 10,
                "width": 10,
                "height": 10,
                "serviceType": "standard"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["cost"], 84.5);
    assert_eq!(response.body["currency"], "USD");
    assert_eq!(response.body["breakdown"]["distanceFactor"], 30.0);
    assert_eq!(response.body["breakdown"]["weightFactor"], 4.0);
    assert_eq!(response.body["breakdown"]["volumeFactor"], 0.5);
    let days = response.body["estimatedDelivery"].as_str().unwrap();
    assert!(["3 days", "4 days", "5 days"].contains(&days), "{days}");
}

#[tokio::test]
async fn test_missing_dimension() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/rates/calculate",
            json!({
                "origin": "Dubai, UAE",
                "destination": "Cairo, Egypt",
                "weight": 2,
                "length": 10,
                "width": 10,
                "serviceType": "express"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_blank_form_field_counts_as_missing() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/rates/calculate",
            json!({
                "origin": "Dubai, UAE",
                "destination": "Cairo, Egypt",
                "weight": "",
                "length": "10",
                "width": "10",
                "height": "10",
                "serviceType": "standard"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing required fields");
}
