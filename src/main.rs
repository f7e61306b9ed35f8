//! Issue Tracker Backend
//!
//! A REST backend serving issue records from volatile in-process storage.

mod api;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::IssueStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<IssueStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Issue Tracker Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the store
    let store = Arc::new(IssueStore::default());
    if config.seed_sample_data {
        let seeded = store.seed_samples()?;
        tracing::info!("Seeded store with {} sample issues", seeded);
    } else {
        tracing::info!("Sample data disabled, starting with an empty store");
    }
    tracing::info!("Issue store ready with {} issues", store.count()?);

    // Create application state
    let state = AppState { store };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/issues", get(api::list_issues).post(api::create_issue))
        .route("/issues/{id}", get(api::get_issue).put(api::update_issue))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
