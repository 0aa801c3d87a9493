// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, document store, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{Config, StoreBackend};
use db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use dotenv::dotenv;
use services::{ProjectService, PROJECTS_COLLECTION};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.clone()
        } else {
            "info,actix_web=info,sqlx=warn".to_string()
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting snapstyle-projects service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Open the document store, once for the whole process
    let store: Arc<dyn DocumentStore> = match config.store_backend() {
        Some(StoreBackend::Postgres) => match config::init_db_pool(&config).await {
            Ok(pool) => Arc::new(PgDocumentStore::new(
                pool,
                &config.documents_table,
                PROJECTS_COLLECTION,
            )),
            Err(e) => {
                log::error!("Failed to connect to database: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            log::info!("Using in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let service = ProjectService::new(store);

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();
    let app_service = service.clone();

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(web::Data::new(app_service.clone()))
            .app_data(handlers::json_config(config_clone.max_body_bytes))
            // Middleware
            .wrap(cors(&config_clone))
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::projects_config)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    // 6. Release the store once the server has drained
    service.close().await;
    log::info!("Server stopped");
    Ok(())
}

/// CORS policy: permissive unless an allow-list is configured
fn cors(config: &Config) -> Cors {
    match config.cors_origins() {
        None => Cors::permissive(),
        Some(origins) => origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
    }
}
