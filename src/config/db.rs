// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup the PostgreSQL pool and the documents table

use crate::config::Config;
use crate::db::pg_store::quote_ident;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
/// Called once during application startup in main.rs
/// Returns pool that is shared by all in-flight requests
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool");

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    ensure_documents_table(&pool, &config.documents_table).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Create the documents table when it does not exist yet
/// `seq` records insertion order, which is the natural order of find_all
async fn ensure_documents_table(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body JSONB NOT NULL,
            seq BIGSERIAL,
            PRIMARY KEY (collection, id)
        )
        "#,
        quote_ident(table)
    );
    sqlx::query(&ddl).execute(pool).await?;

    log::info!("Documents table '{}' is ready", table);
    Ok(())
}
