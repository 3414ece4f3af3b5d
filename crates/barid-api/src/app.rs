//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::security::with_security_headers;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    let mut app = build_router(state)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&server.cors));

    if server.security_headers {
        app = with_security_headers(app);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}
