//! PostgreSQL document store.
//!
//! All collections share one `documents` table keyed by `(collection, id)`
//! with a JSONB body. Composite indexes are expression indexes over JSONB
//! fields, recorded in `document_indexes` so every process sees the same
//! catalogue.
//!
//! Ordering compares raw JSONB, so order fields must hold epoch milliseconds;
//! [`normalize_order_fields`](super::normalize_order_fields) rewrites legacy
//! shapes at startup.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::RwLock;
use tracing::{debug, info};

use barid_core::error::{AppError, ErrorKind};
use barid_core::result::AppResult;
use barid_core::traits::{
    Collection, Document, DocumentStore, IndexSpec, Query, WriteBatch, WriteOp,
};

use super::is_safe_field;

/// PostgreSQL-backed [`DocumentStore`].
#[derive(Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
    indexes: RwLock<HashSet<IndexSpec>>,
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

fn checked_field(name: &str) -> AppResult<&str> {
    if is_safe_field(name) {
        Ok(name)
    } else {
        Err(AppError::validation(format!("Invalid field name: {name}")))
    }
}

impl PgDocumentStore {
    /// Wrap a migrated pool and load the index catalogue.
    pub async fn open(pool: PgPool) -> AppResult<Self> {
        let rows: Vec<(String, Vec<String>, String)> = sqlx::query_as(
            "SELECT collection, equality_fields, order_field FROM document_indexes",
        )
        .fetch_all(&pool)
        .await
        .map_err(db_error("Failed to load index catalogue"))?;

        let indexes = rows
            .into_iter()
            .filter_map(|(collection, equality, order)| {
                let collection = Collection::ALL
                    .into_iter()
                    .find(|c| c.as_str() == collection)?;
                Some(IndexSpec {
                    collection,
                    equality,
                    order,
                })
            })
            .collect::<HashSet<_>>();

        debug!(count = indexes.len(), "Loaded index catalogue");
        Ok(Self {
            pool,
            indexes: RwLock::new(indexes),
        })
    }

    async fn check_index(&self, query: &Query) -> AppResult<()> {
        let Some(required) = query.required_index() else {
            return Ok(());
        };
        let indexes = self.indexes.read().await;
        if indexes.iter().any(|spec| spec.serves(&required)) {
            Ok(())
        } else {
            Err(AppError::missing_index(format!(
                "The query requires an index on {} ({} ordered by {})",
                required.collection,
                required.equality.join(", "),
                required.order
            )))
        }
    }

    fn select_sql(query: &Query) -> AppResult<String> {
        let mut sql = String::from("SELECT id, data FROM documents WHERE collection = $1");
        for (i, filter) in query.filters.iter().enumerate() {
            let field = checked_field(&filter.field)?;
            sql.push_str(&format!(" AND data -> '{field}' = ${}", i + 2));
        }
        if let Some(sort) = &query.order_by {
            let field = checked_field(&sort.field)?;
            sql.push_str(&format!(
                " ORDER BY data -> '{field}' {}, id ASC",
                sort.direction.as_sql()
            ));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        Ok(sql)
    }

    fn index_ddl(spec: &IndexSpec) -> AppResult<String> {
        let mut columns = Vec::with_capacity(spec.equality.len() + 1);
        for field in spec.equality.iter().chain(std::iter::once(&spec.order)) {
            columns.push(format!("(data -> '{}')", checked_field(field)?));
        }
        Ok(format!(
            "CREATE INDEX IF NOT EXISTS {} ON documents ({}) WHERE collection = '{}'",
            spec.name(),
            columns.join(", "),
            spec.collection.as_str()
        ))
    }

    async fn apply(tx: &mut Transaction<'_, Postgres>, op: WriteOp) -> AppResult<()> {
        match op {
            WriteOp::Set {
                collection,
                id,
                data,
            } => {
                sqlx::query(
                    "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
                     ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
                )
                .bind(collection.as_str())
                .bind(&id)
                .bind(data)
                .execute(&mut **tx)
                .await
                .map_err(db_error("Failed to write document"))?;
            }
            WriteOp::Merge {
                collection,
                id,
                patch,
            } => {
                let result = sqlx::query(
                    "UPDATE documents SET data = data || $3, updated_at = NOW() \
                     WHERE collection = $1 AND id = $2",
                )
                .bind(collection.as_str())
                .bind(&id)
                .bind(patch)
                .execute(&mut **tx)
                .await
                .map_err(db_error("Failed to update document"))?;
                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(format!("No document {collection}/{id}")));
                }
            }
            WriteOp::Delete { collection, id } => {
                sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                    .bind(collection.as_str())
                    .bind(&id)
                    .execute(&mut **tx)
                    .await
                    .map_err(db_error("Failed to delete document"))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::with_source(ErrorKind::ServiceUnavailable, "Database ping failed", e)
            })
    }

    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        let row: Option<(String, Value)> =
            sqlx::query_as("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.as_str())
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to read document"))?;
        Ok(row.map(|(id, data)| Document { id, data }))
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> AppResult<()> {
        let mut batch = WriteBatch::new();
        batch.set(collection, id, data);
        self.commit(batch).await
    }

    async fn merge(&self, collection: Collection, id: &str, patch: Value) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(patch)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update document"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete document"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        self.check_index(query).await?;
        let sql = Self::select_sql(query)?;

        let mut q = sqlx::query_as::<_, (String, Value)>(&sql).bind(query.collection.as_str());
        for filter in &query.filters {
            q = q.bind(filter.value.clone());
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query documents"))?;
        Ok(rows
            .into_iter()
            .map(|(id, data)| Document { id, data })
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        for op in batch.into_ops() {
            Self::apply(&mut tx, op).await?;
        }
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }

    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> AppResult<()> {
        for spec in specs {
            let ddl = Self::index_ddl(spec)?;
            sqlx::query(&ddl)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to create index"))?;

            sqlx::query(
                "INSERT INTO document_indexes (name, collection, equality_fields, order_field) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (name) DO NOTHING",
            )
            .bind(spec.name())
            .bind(spec.collection.as_str())
            .bind(&spec.equality)
            .bind(&spec.order)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to register index"))?;

            info!(index = %spec.name(), collection = %spec.collection, "Index ready");
            self.indexes.write().await.insert(spec.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barid_core::types::SortField;

    #[test]
    fn test_select_sql_inlines_checked_fields() {
        let query = Query::new(Collection::Reviews)
            .filter("approved", true)
            .order_by(SortField::desc("createdAt"))
            .limit(50);
        assert_eq!(
            PgDocumentStore::select_sql(&query).unwrap(),
            "SELECT id, data FROM documents WHERE collection = $1 \
             AND data -> 'approved' = $2 ORDER BY data -> 'createdAt' DESC, id ASC LIMIT 50"
        );

        let hostile = Query::new(Collection::Reviews).filter("a' OR '1'='1", true);
        assert_eq!(
            PgDocumentStore::select_sql(&hostile).unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_index_ddl() {
        let spec = IndexSpec::new(Collection::Trackings, &["trackingNumber"], "timestamp");
        assert_eq!(
            PgDocumentStore::index_ddl(&spec).unwrap(),
            "CREATE INDEX IF NOT EXISTS idx_trackings_trackingnumber_timestamp ON documents \
             ((data -> 'trackingNumber'), (data -> 'timestamp')) WHERE collection = 'trackings'"
        );
    }
}
