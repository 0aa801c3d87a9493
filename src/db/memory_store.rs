// src/db/memory_store.rs
// DOCUMENTATION: In-process document store
// PURPOSE: Backing store for tests and STORE_BACKEND=memory

use crate::db::document_store::{document_id, Document, DocumentStore};
use crate::errors::ProjectsError;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

/// Thread-safe document store held in memory
/// Documents are kept in insertion order
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }
}

fn has_id(doc: &Document, id: &str) -> bool {
    doc.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(&self) -> Result<Vec<Document>, ProjectsError> {
        Ok(self.docs.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>, ProjectsError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| has_id(d, id)).cloned())
    }

    async fn insert_one(&self, doc: Document) -> Result<(), ProjectsError> {
        let id = document_id(&doc)?;
        let mut docs = self.docs.write().await;

        if docs.iter().any(|d| has_id(d, &id)) {
            return Err(ProjectsError::DatabaseError(format!(
                "duplicate document id: {}",
                id
            )));
        }

        docs.push(doc);
        Ok(())
    }

    async fn update_one(&self, id: &str, fields: Document) -> Result<u64, ProjectsError> {
        let mut docs = self.docs.write().await;

        match docs.iter_mut().find(|d| has_id(d, id)) {
            Some(doc) => {
                for (key, value) in fields {
                    doc.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: &str) -> Result<u64, ProjectsError> {
        let mut docs = self.docs.write().await;

        match docs.iter().position(|d| has_id(d, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
