//! In-process document store.
//!
//! Mirrors the PostgreSQL backend's semantics, including the missing-index
//! error for ordered queries, so services behave identically in tests and
//! local development.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use barid_core::error::AppError;
use barid_core::result::AppResult;
use barid_core::traits::{
    Collection, Document, DocumentStore, IndexSpec, Query, WriteBatch, WriteOp,
};

use super::compare_values;

type Tables = HashMap<Collection, BTreeMap<String, Value>>;

/// Memory-backed [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    tables: RwLock<Tables>,
    indexes: RwLock<HashSet<IndexSpec>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create an empty store with no indexes registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the backend connection.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        self.tables
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Document store is unreachable"));
        }
        Ok(())
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
}

fn merge_into(target: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}

fn apply(tables: &mut Tables, op: WriteOp) -> AppResult<()> {
    match op {
        WriteOp::Set {
            collection,
            id,
            data,
        } => {
            tables.entry(collection).or_default().insert(id, data);
        }
        WriteOp::Merge {
            collection,
            id,
            patch,
        } => {
            let doc = tables
                .get_mut(&collection)
                .and_then(|table| table.get_mut(&id))
                .ok_or_else(|| AppError::not_found(format!("No document {collection}/{id}")))?;
            merge_into(doc, patch);
        }
        WriteOp::Delete { collection, id } => {
            if let Some(table) = tables.get_mut(&collection) {
                table.remove(&id);
            }
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_online()
    }

    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(&collection)
            .and_then(|table| table.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> AppResult<()> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        tables
            .entry(collection)
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn merge(&self, collection: Collection, id: &str, patch: Value) -> AppResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        match tables.get_mut(&collection).and_then(|t| t.get_mut(id)) {
            Some(doc) => {
                merge_into(doc, patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .get_mut(&collection)
            .and_then(|t| t.remove(id))
            .is_some())
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        self.check_online()?;
        self.check_index(query).await?;

        let tables = self.tables.read().await;
        let mut docs: Vec<Document> = tables
            .get(&query.collection)
            .into_iter()
            .flat_map(|table| table.iter())
            .filter(|(_, data)| query.matches(data))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        drop(tables);

        if let Some(sort) = &query.order_by {
            docs.sort_by(|a, b| {
                sort.direction
                    .apply(compare_values(a.field(&sort.field), b.field(&sort.field)))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<()> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();
        for op in batch.into_ops() {
            apply(&mut staged, op)?;
        }
        *tables = staged;
        Ok(())
    }

    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> AppResult<()> {
        self.check_online()?;
        self.indexes.write().await.extend(specs.iter().cloned());
        Ok(())
    }
}
