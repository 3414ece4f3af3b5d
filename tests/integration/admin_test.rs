//! Admin login, shipment management, and tracking entry edits.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use barid_auth::JwtEncoder;
use barid_core::config::{AppConfig, AuthConfig};

use crate::helpers::{ADMIN_PASSWORD, TestApp};

#[tokio::test]
async fn test_login_issues_usable_token() {
    let app = TestApp::with_admin_password().await;

    let wrong = app
        .post("/admin/login", json!({ "password": "guess" }))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "Invalid password");

    let ok = app
        .post("/admin/login", json!({ "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["success"], true);
    assert!(ok.body["expiresAt"].is_string());

    let token = ok.body["token"].as_str().unwrap();
    let list = app
        .request("GET", "/admin/shipments", None, Some(token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
}

#[tokio::test]
async fn test_default_config_refuses_admin_access() {
    let app = TestApp::from_config(AppConfig::default(), true).await;

    let login = app.post("/admin/login", json!({ "password": "" })).await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let (token, _) = JwtEncoder::new(&AuthConfig::default())
        .issue(Utc::now())
        .unwrap();
    for path in ["/admin/reviews", "/admin/shipments"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.body["code"], "AUTHENTICATION");
    }
}

#[tokio::test]
async fn test_admin_routes_reject_bad_tokens() {
    let app = TestApp::new().await;

    let missing = app.get("/admin/shipments").await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request("GET", "/admin/shipments", None, Some("not.a.jwt"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.body["code"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_list_is_newest_first_and_uncached() {
    let app = TestApp::new().await;
    let first = app.create_shipment("standard").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app.create_shipment("express").await;

    let response = app.admin("GET", "/admin/shipments", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let codes: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["_id"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec![second.as_str(), first.as_str()]);
    assert_eq!(
        response.headers["cache-control"],
        "no-store, no-cache, must-revalidate, proxy-revalidate"
    );
    assert_eq!(response.headers["pragma"], "no-cache");
}

#[tokio::test]
async fn test_update_without_description_changes_status_only() {
    let app = TestApp::new().await;
    let code = app.create_shipment("standard").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = app
        .admin(
            "PATCH",
            &format!("/admin/shipments/{code}"),
            Some(json!({ "status": "Exception", "location": "Customs, Qatar" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Shipment updated successfully");
    assert_eq!(response.body["trackingNumber"], code);

    let detail = app
        .admin("GET", &format!("/admin/shipments/{code}"), None)
        .await;
    assert_eq!(detail.body["status"], "Exception");
    assert_eq!(detail.body["history"].as_array().unwrap().len(), 1);

    let tracking = app.get(&format!("/tracking/{code}")).await;
    assert_eq!(tracking.body["status"], "Exception");
    assert_eq!(tracking.body["currentLocation"], "Customs, Qatar");
}

#[tokio::test]
async fn test_update_rejects_bad_date() {
    let app = TestApp::new().await;
    let code = app.create_shipment("standard").await;

    let response = app
        .admin(
            "PATCH",
            &format!("/admin/shipments/{code}"),
            Some(json!({ "estimatedDelivery": "next tuesday" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid date format");

    let response = app
        .admin(
            "PATCH",
            &format!("/admin/shipments/{code}"),
            Some(json!({ "estimatedDelivery": "2030-01-15" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let tracking = app.get(&format!("/tracking/{code}")).await;
    assert_eq!(tracking.body["estimatedDelivery"], "2030-01-15");
}

#[tokio::test]
async fn test_update_unknown_shipment() {
    let app = TestApp::new().await;
    let response = app
        .admin(
            "PATCH",
            "/admin/shipments/AB0000000000000",
            Some(json!({ "status": "Delivered" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_and_delete_tracking_entry() {
    let app = TestApp::new().await;
    let code = app.create_shipment("standard").await;

    let detail = app
        .admin("GET", &format!("/admin/shipments/{code}"), None)
        .await;
    let entry_id = detail.body["history"][0]["id"].as_str().unwrap().to_string();

    let bad = app
        .admin(
            "PATCH",
            &format!("/admin/tracking/{entry_id}"),
            Some(json!({ "timestamp": "sometime" })),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.body["error"], "Invalid date format");

    let edited = app
        .admin(
            "PATCH",
            &format!("/admin/tracking/{entry_id}"),
            Some(json!({
                "location": "Jebel Ali, UAE",
                "timestamp": "2024-03-01T09:15"
            })),
        )
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["message"], "Tracking entry updated successfully");
    assert_eq!(edited.body["trackingId"], entry_id);

    let tracking = app.get(&format!("/tracking/{code}")).await;
    let entry = &tracking.body["history"][0];
    assert_eq!(entry["location"], "Jebel Ali, UAE");
    assert_eq!(entry["timestamp"], "2024-03-01T09:15:00.000Z");
    assert_eq!(entry["description"], "Shipment created and collected");

    let deleted = app
        .admin("DELETE", &format!("/admin/tracking/{entry_id}"), None)
        .await;
    assert_eq!(deleted.body["message"], "Tracking entry deleted successfully");

    let again = app
        .admin("DELETE", &format!("/admin/tracking/{entry_id}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], "Tracking entry not found");
}

#[tokio::test]
async fn test_delete_cascades_to_history() {
    let app = TestApp::new().await;
    let code = app.create_shipment("express").await;
    app.admin(
        "PATCH",
        &format!("/admin/shipments/{code}"),
        Some(json!({
            "status": "In Transit",
            "location": "Riyadh, KSA",
            "description": "Crossed border"
        })),
    )
    .await;

    let deleted = app
        .admin("DELETE", &format!("/admin/shipments/{code}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["trackingNumber"], code);

    assert_eq!(
        app.get(&format!("/shipments/{code}")).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.store.count(barid_core::traits::Collection::Trackings).await,
        0
    );

    let again = app
        .admin("DELETE", &format!("/admin/shipments/{code}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
