//! [`DocumentStore`] backends and shared helpers.

pub mod indexes;
pub mod memory;
pub mod postgres;

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use barid_core::config::{DatabaseConfig, StoreBackend};
use barid_core::result::AppResult;
use barid_core::traits::DocumentStore;
use barid_core::types::timestamp;

pub use indexes::{normalize_order_fields, required_indexes};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

/// Open the configured backend and, if enabled, ensure the required indexes
/// and normalize legacy timestamps in their order fields.
pub async fn open(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            run_migrations(pool.pool()).await?;
            Arc::new(PgDocumentStore::open(pool.into_pool()).await?)
        }
        StoreBackend::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    if config.ensure_indexes {
        let specs = required_indexes();
        store.ensure_indexes(&specs).await?;
        info!(count = specs.len(), backend = store.backend_name(), "Required indexes ensured");
        normalize_order_fields(store.as_ref(), &specs).await?;
    }

    Ok(store)
}

/// Total order over JSON field values used for in-memory sorting.
///
/// Values that read as timestamps compare chronologically. Otherwise the
/// order is `null < bool < number < string < array < object`.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    if let (Some(x), Some(y)) = (timestamp::from_stored(a), timestamp::from_stored(b)) {
        return x.cmp(&y);
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Whether a field name is safe to inline into SQL and index names.
pub(crate) fn is_safe_field(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 48
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
