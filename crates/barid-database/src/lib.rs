//! # barid-database
//!
//! Document store backends for Al Barid: a PostgreSQL JSONB store and an
//! in-process memory store, both implementing
//! [`DocumentStore`](barid_core::traits::DocumentStore). Also provides
//! connection pooling, migrations, the required index catalogue, typed
//! repositories with the missing-index fallback, and degraded-read metrics.

pub mod connection;
pub mod metrics;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use metrics::StoreMetrics;
pub use store::{MemoryDocumentStore, PgDocumentStore};
