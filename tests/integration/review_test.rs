//! Review submission, public listing, and moderation.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn review(rating: Value, text: &str) -> Value {
    json!({
        "customerName": "Layla Mansour",
        "rating": rating,
        "reviewText": text,
        "location": "Muscat, Oman"
    })
}

#[tokio::test]
async fn test_rating_bounds_and_auto_approval() {
    let app = TestApp::new().await;

    for rating in [0, 6] {
        let response = app.post("/reviews", review(json!(rating), "great")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "rating {rating}");
    }

    let cases = [(5, "great", true), (5, "this is spam", false), (3, "fine", false)];
    for (rating, text, approved) in cases {
        let response = app.post("/reviews", review(json!(rating), text)).await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["message"], "Review submitted successfully");
        assert_eq!(response.body["approved"], approved, "{text}");
        assert_eq!(response.body["review"]["approved"], approved);
        assert!(response.body["review"]["_id"].is_string());
    }
}

#[tokio::test]
async fn test_rating_as_string_is_accepted() {
    let app = TestApp::new().await;
    let response = app.post("/reviews", review(json!("4"), "Quick delivery")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["review"]["rating"], 4);
}

#[tokio::test]
async fn test_out_of_range_message() {
    let app = TestApp::new().await;
    let response = app.post("/reviews", review(json!(9), "great")).await;
    assert_eq!(response.body["error"], "Rating must be between 1 and 5");
}

async fn seed(app: &TestApp) {
    for (rating, text) in [(5, "first"), (2, "second"), (4, "third")] {
        app.post("/reviews", review(json!(rating), text)).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
}

fn texts(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["reviewText"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_public_list_is_approved_newest_first() {
    for app in [TestApp::new().await, TestApp::without_indexes().await] {
        seed(&app).await;
        let response = app.get("/reviews").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(texts(&response.body), vec!["third", "first"]);
    }
}

#[tokio::test]
async fn test_moderation_flow() {
    let app = TestApp::new().await;
    seed(&app).await;

    let all = app.admin("GET", "/admin/reviews", None).await;
    assert_eq!(texts(&all.body), vec!["third", "second", "first"]);
    let pending_id = all.body[1]["_id"].as_str().unwrap().to_string();

    let approved = app
        .admin(
            "PATCH",
            &format!("/admin/reviews/{pending_id}"),
            Some(json!({ "approved": true })),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["message"], "Review approved successfully");
    assert_eq!(app.get("/reviews").await.body.as_array().unwrap().len(), 3);

    let rejected = app
        .admin(
            "PATCH",
            &format!("/admin/reviews/{pending_id}"),
            Some(json!({ "approved": false })),
        )
        .await;
    assert_eq!(rejected.body["message"], "Review rejected successfully");
    assert_eq!(app.get("/reviews").await.body.as_array().unwrap().len(), 2);

    let deleted = app
        .admin("DELETE", &format!("/admin/reviews/{pending_id}"), None)
        .await;
    assert_eq!(deleted.body["message"], "Review deleted successfully");

    let missing = app
        .admin("DELETE", &format!("/admin/reviews/{pending_id}"), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "Review not found");
}

#[tokio::test]
async fn test_admin_list_requires_token() {
    let app = TestApp::new().await;
    let response = app.get("/admin/reviews").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
