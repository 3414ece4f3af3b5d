//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use barid_auth::{AdminGate, JwtEncoder};
use barid_core::config::AppConfig;
use barid_core::traits::DocumentStore;
use barid_database::store::required_indexes;
use barid_database::{MemoryDocumentStore, StoreMetrics};
use barid_service::ShipmentService;

pub const ADMIN_PASSWORD: &str = "s3cret-harbour";

/// Test application context
pub struct TestApp {
    /// The Axum app under test
    pub router: Router,
    /// Direct handle on the backing store
    pub store: Arc<MemoryDocumentStore>,
    /// Degraded-read counters shared with the app
    pub metrics: Arc<StoreMetrics>,
    /// Application config
    pub config: AppConfig,
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Well-formed Argon2 PHC string whose digest matches no password.
const LOCKED_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$YmFyaWQtdGVzdC1zYWx0IQ$XmAXAnQ35ZXscq3uBxjXjwks3aqNMQSMnVui7WR97V4";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

fn locked_config() -> AppConfig {
    let mut config = test_config();
    config.auth.admin_password_hash = Some(LOCKED_PASSWORD_HASH.to_string());
    config
}

impl TestApp {
    /// App over an indexed memory store. Admin access is enabled with a hash
    /// no password matches; tokens come from [`TestApp::admin_token`].
    pub async fn new() -> Self {
        Self::from_config(locked_config(), true).await
    }

    /// App whose store has no secondary indexes, forcing fallback reads.
    pub async fn without_indexes() -> Self {
        Self::from_config(locked_config(), false).await
    }

    /// App with a configured admin password.
    pub async fn with_admin_password() -> Self {
        let mut config = test_config();
        config.auth.admin_password = Some(ADMIN_PASSWORD.to_string());
        Self::from_config(config, true).await
    }

    /// App built from an explicit configuration.
    pub async fn from_config(config: AppConfig, indexed: bool) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        if indexed {
            store
                .ensure_indexes(&required_indexes())
                .await
                .expect("Failed to ensure indexes");
        }
        let metrics = Arc::new(StoreMetrics::new());

        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        let gate = AdminGate::from_config(&config.auth).expect("Failed to build admin gate");
        let shipments = ShipmentService::new(
            Arc::clone(&dyn_store),
            Arc::clone(&metrics),
            config.shipments.clone(),
        );
        let state = barid_api::AppState::with_shipment_service(
            config.clone(),
            dyn_store,
            Arc::clone(&metrics),
            gate,
            shipments,
        );

        Self {
            router: barid_api::build_app(state),
            store,
            metrics,
            config,
        }
    }

    /// A valid admin bearer token.
    pub fn admin_token(&self) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue(Utc::now())
            .expect("Failed to issue token")
            .0
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Authenticated admin request.
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let token = self.admin_token();
        self.request(method, path, body, Some(&token)).await
    }

    /// Create a shipment through the API and return its tracking number.
    pub async fn create_shipment(&self, service_type: &str) -> String {
        let response = self.post("/shipments", shipment_body(service_type)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["trackingNumber"]
            .as_str()
            .expect("No trackingNumber in response")
            .to_string()
    }
}

/// A complete create-shipment body.
pub fn shipment_body(service_type: &str) -> Value {
    json!({
        "sender": {
            "name": "Amira Haddad",
            "email": "amira@example.com",
            "phone": "+971500000001",
            "address": "12 Creek Road",
            "city": "Dubai",
            "country": "UAE",
            "postalCode": "00000"
        },
        "receiver": {
            "name": "Khalid Nasser",
            "email": "khalid@example.com",
            "phone": "+97450000002",
            "address": "4 Corniche St",
            "city": "Doha",
            "country": "Qatar",
            "postalCode": "11111"
        },
        "packageDetails": {
            "weight": 2.5,
            "length": 30.0,
            "width": 20.0,
            "height": 10.0,
            "contents": "Books",
            "value": 120.0
        },
        "deliveryOptions": {
            "serviceType": service_type,
            "insurance": true,
            "specialInstructions": "Leave at reception"
        }
    })
}
