//! Whaletrace API server entry point
//!
//! Seeds the in-memory store, builds the assistant runtime from environment
//! configuration, and starts the Axum HTTP server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use whaletrace_agent::AssistantRuntime;
use whaletrace_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use whaletrace_store::MemoryStore;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(MemoryStore::with_demo_data());
    tracing::info!("Seeded in-memory store with demo data");

    let assistant = AssistantRuntime::from_env(store.clone())
        .map_err(|e| ApiError::internal_error(format!("Failed to build assistant: {}", e)))?;

    let config = ApiConfig::from_env();
    let state = AppState::new(store, Arc::new(assistant));
    let app = create_api_router(state, &config);

    let addr = config.socket_addr()?;
    tracing::info!(%addr, "Starting Whaletrace API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
