//! Route definitions for the Al Barid HTTP API.
//!
//! Routes are grouped by domain. The router receives `AppState` and passes
//! it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route and no outer middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(shipment_routes())
        .merge(tracking_routes())
        .merge(rate_routes())
        .merge(review_routes())
        .merge(contact_routes())
        .merge(health_routes())
        .merge(admin_routes())
        .with_state(state)
}

/// Shipment creation and raw lookup
fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/shipments", post(handlers::shipment::create_shipment))
        .route("/shipments/{code}", get(handlers::shipment::get_shipment))
}

/// Customer-facing tracking page
fn tracking_routes() -> Router<AppState> {
    Router::new().route("/tracking/{code}", get(handlers::tracking::track_shipment))
}

/// Rate calculator
fn rate_routes() -> Router<AppState> {
    Router::new().route("/rates/calculate", post(handlers::rates::calculate_rate))
}

/// Public reviews
fn review_routes() -> Router<AppState> {
    Router::new().route(
        "/reviews",
        get(handlers::review::list_reviews).post(handlers::review::submit_review),
    )
}

/// Contact form
fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(handlers::contact::submit_contact))
}

/// Health probes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Admin login and token-gated management endpoints
fn admin_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/admin/login", post(admin::auth::login))
        .route("/admin/shipments", get(admin::shipments::list_shipments))
        .route(
            "/admin/shipments/{code}",
            get(admin::shipments::get_shipment)
                .patch(admin::shipments::update_shipment)
                .delete(admin::shipments::delete_shipment),
        )
        .route(
            "/admin/tracking/{id}",
            patch(admin::tracking::update_entry).delete(admin::tracking::delete_entry),
        )
        .route("/admin/reviews", get(admin::reviews::list_reviews))
        .route(
            "/admin/reviews/{id}",
            patch(admin::reviews::moderate_review).delete(admin::reviews::delete_review),
        )
}
