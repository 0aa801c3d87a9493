// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod document_store;
pub mod memory_store;
pub mod pg_store;

pub use document_store::{Document, DocumentStore};
pub use memory_store::MemoryDocumentStore;
pub use pg_store::PgDocumentStore;
