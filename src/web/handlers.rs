//! HTTP handlers for the reference backend.

use crate::error::{DashboardError, Result};
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Timestamp layout written into log entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shared state behind every handler.
#[derive(Debug)]
pub struct BackendState {
    command: Mutex<Value>,
    log_path: PathBuf,
    // Serializes read-modify-write cycles on the log file.
    log_lock: Mutex<()>,
}

impl BackendState {
    pub fn new(initial_command: impl Into<String>, log_path: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            command: Mutex::new(Value::String(initial_command.into())),
            log_path: log_path.into(),
            log_lock: Mutex::new(()),
        })
    }

    /// Load the stored log; a missing file is an empty log.
    pub async fn read_log(&self) -> Result<Vec<Value>> {
        match tokio::fs::read_to_string(&self.log_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                DashboardError::storage_error(format!(
                    "{} is not a JSON array: {}",
                    self.log_path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append one entry to the stored log.
    pub async fn append_log(&self, entry: Value) -> Result<()> {
        let _guard = self.log_lock.lock().await;
        let mut entries = self.read_log().await?;
        entries.push(entry);
        let content = serde_json::to_string_pretty(&entries)
            .map_err(|e| DashboardError::storage_error(e.to_string()))?;
        tokio::fs::write(&self.log_path, content).await?;
        Ok(())
    }
}

fn internal_error(e: DashboardError) -> StatusCode {
    error!("Backend request failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// `GET /command`
pub async fn get_command(State(state): State<Arc<BackendState>>) -> Json<Value> {
    let command = state.command.lock().await.clone();
    info!("Sending command: {}", command);
    Json(json!({ "command": command }))
}

/// `POST /update-command`
pub async fn update_command(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let command = body.get("command").cloned().unwrap_or(Value::Null);
    info!("Updated command: {}", command);
    *state.command.lock().await = command;
    Json(json!({ "message": "Command updated successfully!" }))
}

/// `POST /data`
pub async fn receive_data(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> std::result::Result<Json<Value>, StatusCode> {
    let entry = json!({
        "timestamp": chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        "soil_moisture": body.get("soil_moisture").cloned().unwrap_or(Value::Null),
    });

    state.append_log(entry.clone()).await.map_err(internal_error)?;
    info!("Logged data: {}", entry);
    Ok(Json(json!({ "message": "Data received and logged successfully!" })))
}

/// `GET /logs`
pub async fn get_logs(
    State(state): State<Arc<BackendState>>,
) -> std::result::Result<Json<Value>, StatusCode> {
    let entries = state.read_log().await.map_err(internal_error)?;
    Ok(Json(Value::Array(entries)))
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "soil-dashboard-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
