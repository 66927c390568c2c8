//! Provider/Service API - Main Application Entry Point
//!
//! A REST API for managing service providers and the services they offer.
//! Providers have unique contact details; services belong to exactly one
//! provider and are uniquely named within it.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries, bounded pool)
//! - **Format**: JSON requests/responses in a `{data, status, message}` envelope
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations (idempotent schema bootstrap)
//! 4. Build HTTP router
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod managers;
mod models;

use tracing_subscriber::EnvFilter;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging. Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        // Provider routes
        .route("/providers", get(handlers::providers::list_providers))
        .route("/providers", post(handlers::providers::create_provider))
        .route("/providers/{id}", get(handlers::providers::get_provider))
        .route("/providers/{id}", put(handlers::providers::update_provider))
        .route(
            "/providers/{id}",
            delete(handlers::providers::delete_provider),
        )
        // Service routes
        .route("/services", get(handlers::services::list_services))
        .route("/services", post(handlers::services::create_service))
        .route("/services/{id}", get(handlers::services::get_service))
        .route("/services/{id}", put(handlers::services::update_service))
        .route("/services/{id}", delete(handlers::services::delete_service))
        // The API serves cross-origin frontends
        .layer(CorsLayer::permissive())
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // Share the pool with all handlers via State extraction
        .with_state(pool);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Serve requests concurrently until the process is stopped
    axum::serve(listener, app).await?;

    Ok(())
}
