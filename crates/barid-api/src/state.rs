//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use barid_auth::AdminGate;
use barid_core::config::AppConfig;
use barid_core::result::AppResult;
use barid_core::traits::DocumentStore;
use barid_database::StoreMetrics;
use barid_service::{
    ContactService, RateEstimator, ReviewService, ShipmentService, TrackingService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store backend
    pub store: Arc<dyn DocumentStore>,
    /// Degraded-read counters
    pub metrics: Arc<StoreMetrics>,

    // ── Auth ─────────────────────────────────────────────────
    /// Admin login and token verification
    pub admin_gate: Arc<AdminGate>,

    // ── Services ─────────────────────────────────────────────
    /// Shipment Record Manager
    pub shipment_service: Arc<ShipmentService>,
    /// Tracking Event Log
    pub tracking_service: Arc<TrackingService>,
    /// Rate Estimator
    pub rate_estimator: Arc<RateEstimator>,
    /// Review Moderation Queue
    pub review_service: Arc<ReviewService>,
    /// Contact relay
    pub contact_service: Arc<ContactService>,
}

impl AppState {
    /// Wire every service over one store.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        metrics: Arc<StoreMetrics>,
    ) -> AppResult<Self> {
        let admin_gate = AdminGate::from_config(&config.auth)?;
        let shipment_service = ShipmentService::new(
            Arc::clone(&store),
            Arc::clone(&metrics),
            config.shipments.clone(),
        );
        Ok(Self::with_shipment_service(
            config,
            store,
            metrics,
            admin_gate,
            shipment_service,
        ))
    }

    /// Wire services around a pre-built shipment service and gate.
    pub fn with_shipment_service(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        metrics: Arc<StoreMetrics>,
        admin_gate: AdminGate,
        shipment_service: ShipmentService,
    ) -> Self {
        let tracking_service = TrackingService::new(Arc::clone(&store), Arc::clone(&metrics));
        let review_service = ReviewService::new(
            Arc::clone(&store),
            Arc::clone(&metrics),
            config.reviews.clone(),
        );
        let rate_estimator = RateEstimator::new(config.rates.clone());

        Self {
            config: Arc::new(config),
            store,
            metrics,
            admin_gate: Arc::new(admin_gate),
            shipment_service: Arc::new(shipment_service),
            tracking_service: Arc::new(tracking_service),
            rate_estimator: Arc::new(rate_estimator),
            review_service: Arc::new(review_service),
            contact_service: Arc::new(ContactService::new()),
        }
    }
}
