// src/db/pg_store.rs
// DOCUMENTATION: PostgreSQL document store
// PURPOSE: Keep JSON documents in a JSONB table, one row per (collection, id)

use crate::db::document_store::{document_id, Document, DocumentStore};
use crate::errors::ProjectsError;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

/// Document store over the table created by `config::init_db_pool`
/// DOCUMENTATION: update_one uses the JSONB `||` operator, which replaces the
/// named top-level keys and keeps the others.
pub struct PgDocumentStore {
    pool: PgPool,
    table: String,
    collection: String,
}

impl PgDocumentStore {
    /// `table` must already be validated as a plain identifier
    pub fn new(pool: PgPool, table: &str, collection: impl Into<String>) -> Self {
        Self {
            pool,
            table: quote_ident(table),
            collection: collection.into(),
        }
    }
}

/// Quote a SQL identifier so reserved words such as `user` stay table names
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self) -> Result<Vec<Document>, ProjectsError> {
        let sql = format!(
            "SELECT body FROM {} WHERE collection = $1 ORDER BY seq ASC",
            self.table
        );

        let rows: Vec<(Json<Document>,)> = sqlx::query_as(&sql)
            .bind(&self.collection)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch {} documents: {}", self.collection, e);
                ProjectsError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(|(body,)| body.0).collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>, ProjectsError> {
        let sql = format!(
            "SELECT body FROM {} WHERE collection = $1 AND id = $2",
            self.table
        );

        let row: Option<(Json<Document>,)> = sqlx::query_as(&sql)
            .bind(&self.collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch document {}: {}", id, e);
                ProjectsError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|(body,)| body.0))
    }

    async fn insert_one(&self, doc: Document) -> Result<(), ProjectsError> {
        let id = document_id(&doc)?;
        let sql = format!(
            "INSERT INTO {} (collection, id, body) VALUES ($1, $2, $3)",
            self.table
        );

        sqlx::query(&sql)
            .bind(&self.collection)
            .bind(&id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to insert document {}: {}", id, e);
                ProjectsError::DatabaseError(e.to_string())
            })?;

        log::debug!("Inserted {} document {}", self.collection, id);
        Ok(())
    }

    async fn update_one(&self, id: &str, fields: Document) -> Result<u64, ProjectsError> {
        let sql = format!(
            "UPDATE {} SET body = body || $3 WHERE collection = $1 AND id = $2",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(&self.collection)
            .bind(id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to update document {}: {}", id, e);
                ProjectsError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_one(&self, id: &str) -> Result<u64, ProjectsError> {
        let sql = format!(
            "DELETE FROM {} WHERE collection = $1 AND id = $2",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(&self.collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete document {}: {}", id, e);
                ProjectsError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        log::info!("Closing database pool");
        self.pool.close().await;
    }
}
