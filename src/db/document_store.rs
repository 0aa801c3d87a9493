// src/db/document_store.rs
// DOCUMENTATION: Document store contract
// PURPOSE: The only persistence surface the project service depends on

use crate::errors::ProjectsError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored document: a JSON object with a string `id` field
pub type Document = Map<String, Value>;

/// Collection of documents keyed by their application level `id`
/// DOCUMENTATION: One instance serves one collection. Implementations must be
/// safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document, in insertion order
    async fn find_all(&self) -> Result<Vec<Document>, ProjectsError>;

    async fn find_one(&self, id: &str) -> Result<Option<Document>, ProjectsError>;

    /// Insert a document; its `id` field must be a string
    async fn insert_one(&self, doc: Document) -> Result<(), ProjectsError>;

    /// Overwrite the top-level fields named in `fields`, leaving the rest.
    /// Returns the number of matched documents.
    async fn update_one(&self, id: &str, fields: Document) -> Result<u64, ProjectsError>;

    /// Returns the number of removed documents
    async fn delete_one(&self, id: &str) -> Result<u64, ProjectsError>;

    /// Release connections at shutdown
    async fn close(&self) {}
}

/// Extract the `id` of a document about to be inserted
pub(crate) fn document_id(doc: &Document) -> Result<String, ProjectsError> {
    doc.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProjectsError::DatabaseError("document has no string 'id' field".into()))
}
