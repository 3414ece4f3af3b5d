//! Core traits defined in `barid-core` and implemented by other crates.

pub mod document_store;

pub use document_store::{
    Collection, Document, DocumentStore, FieldFilter, IndexSpec, Query, WriteBatch, WriteOp,
};
