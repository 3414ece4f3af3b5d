//! Document store abstraction.
//!
//! Shipments, tracking events, and reviews are schemaless JSON documents
//! grouped into named collections. Ordered queries require a registered
//! composite index ([`IndexSpec`]); without one the store answers with
//! [`ErrorKind::MissingIndex`](crate::error::ErrorKind::MissingIndex) and
//! callers fall back to an unordered, capped scan.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::SortField;

/// A named group of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Shipment records keyed by tracking number.
    Shipments,
    /// Tracking events with store-assigned ids.
    Trackings,
    /// Customer reviews with store-assigned ids.
    Reviews,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 3] = [Self::Shipments, Self::Trackings, Self::Reviews];

    /// Persistent collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shipments => "shipments",
            Self::Trackings => "trackings",
            Self::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document identifier, unique within its collection.
    pub id: String,
    /// Document body, always a JSON object.
    pub data: Value,
}

impl Document {
    /// Read a top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Equality constraint on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Field name.
    pub field: String,
    /// Required value.
    pub value: Value,
}

impl FieldFilter {
    /// Whether a document body satisfies this filter.
    pub fn matches(&self, data: &Value) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// A collection query: equality filters, optional ordering, optional limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Collection to read.
    pub collection: Collection,
    /// Equality filters (conjunctive).
    pub filters: Vec<FieldFilter>,
    /// Ordering, if any.
    pub order_by: Option<SortField>,
    /// Maximum number of documents returned.
    pub limit: Option<usize>,
}

impl Query {
    /// Start a query over a collection.
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add an equality filter.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Order results.
    pub fn order_by(mut self, sort: SortField) -> Self {
        self.order_by = Some(sort);
        self
    }

    /// Cap the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Same query with ordering removed.
    pub fn unordered(&self) -> Self {
        Self {
            order_by: None,
            ..self.clone()
        }
    }

    /// Whether a document body satisfies every filter.
    pub fn matches(&self, data: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(data))
    }

    /// The index shape this query needs, if it is ordered.
    pub fn required_index(&self) -> Option<IndexSpec> {
        self.order_by.as_ref().map(|sort| IndexSpec {
            collection: self.collection,
            equality: self.filters.iter().map(|f| f.field.clone()).collect(),
            order: sort.field.clone(),
        })
    }
}

/// Composite index declaration: equality fields followed by an order field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexSpec {
    /// Collection the index belongs to.
    pub collection: Collection,
    /// Equality-filtered fields, in declaration order.
    pub equality: Vec<String>,
    /// Field used for ordering.
    pub order: String,
}

impl IndexSpec {
    /// Declare an index.
    pub fn new(collection: Collection, equality: &[&str], order: &str) -> Self {
        Self {
            collection,
            equality: equality.iter().map(|s| (*s).to_string()).collect(),
            order: order.to_string(),
        }
    }

    /// Stable name used for physical indexes.
    pub fn name(&self) -> String {
        let mut parts = vec![format!("idx_{}", self.collection)];
        parts.extend(self.equality.iter().map(|f| f.to_lowercase()));
        parts.push(self.order.to_lowercase());
        parts.join("_")
    }

    /// Whether this index can serve the given requirement.
    ///
    /// Equality fields are compared as a set.
    pub fn serves(&self, required: &IndexSpec) -> bool {
        if self.collection != required.collection || self.order != required.order {
            return false;
        }
        let mut mine = self.equality.clone();
        let mut theirs = required.equality.clone();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

/// A single mutation inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document.
    Set {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Full document body.
        data: Value,
    },
    /// Shallow-merge top-level fields into an existing document.
    Merge {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Fields to overwrite.
        patch: Value,
    },
    /// Remove a document. Missing documents are ignored.
    Delete {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
    },
}

/// An ordered set of writes applied atomically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a create-or-replace.
    pub fn set(&mut self, collection: Collection, id: impl Into<String>, data: Value) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection,
            id: id.into(),
            data,
        });
        self
    }

    /// Queue a shallow merge. The batch fails if the document is missing.
    pub fn merge(
        &mut self,
        collection: Collection,
        id: impl Into<String>,
        patch: Value,
    ) -> &mut Self {
        self.ops.push(WriteOp::Merge {
            collection,
            id: id.into(),
            patch,
        });
        self
    }

    /// Queue a delete.
    pub fn delete(&mut self, collection: Collection, id: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection,
            id: id.into(),
        });
        self
    }

    /// Queued operations.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the batch.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Trait for document persistence backends.
///
/// The trait is defined in `barid-core` and implemented in `barid-database`
/// by a PostgreSQL JSONB store and an in-process memory store.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug + 'static {
    /// Backend name reported by the health endpoints (e.g., "postgres").
    fn backend_name(&self) -> &'static str;

    /// Allocate a fresh document id without writing anything.
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// Round-trip to the backend.
    async fn ping(&self) -> AppResult<()>;

    /// Read one document.
    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>>;

    /// Insert a document under a store-assigned id and return the id.
    async fn add(&self, collection: Collection, data: Value) -> AppResult<String> {
        let id = self.new_id();
        self.set(collection, &id, data).await?;
        Ok(id)
    }

    /// Create or replace a document.
    async fn set(&self, collection: Collection, id: &str, data: Value) -> AppResult<()>;

    /// Shallow-merge fields into a document. Returns `false` if it does not exist.
    async fn merge(&self, collection: Collection, id: &str, patch: Value) -> AppResult<bool>;

    /// Remove a document. Returns `false` if it did not exist.
    async fn delete(&self, collection: Collection, id: &str) -> AppResult<bool>;

    /// Run a query.
    ///
    /// Ordered queries without a registered index fail with a missing-index
    /// error.
    async fn query(&self, query: &Query) -> AppResult<Vec<Document>>;

    /// Apply every operation of the batch or none of them.
    async fn commit(&self, batch: WriteBatch) -> AppResult<()>;

    /// Create and register composite indexes.
    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> AppResult<()>;
}
