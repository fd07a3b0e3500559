//! Reference device backend.
//!
//! A small axum server exposing the four endpoints the dashboard consumes, backed
//! by a JSON log file. It is meant for local development and integration tests.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::BackendConfig;
pub use router::create_app;

use crate::error::{DashboardError, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Bind the configured address and serve the backend until the process stops.
pub async fn start_backend(config: BackendConfig) -> Result<()> {
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| DashboardError::config_error(format!("Invalid bind address: {}", e)))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| DashboardError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    serve(listener, config).await
}

/// Serve the backend on an already bound listener.
pub async fn serve(listener: TcpListener, config: BackendConfig) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Starting soil backend on http://{}", addr);
    info!("Reading log stored in {}", config.log_path.display());

    axum::serve(listener, create_app(&config))
        .await
        .map_err(|e| DashboardError::web_server_error(format!("Server error: {}", e)))
}
