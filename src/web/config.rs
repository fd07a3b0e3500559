//! Reference backend configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the reference device backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Whether to enable CORS
    pub enable_cors: bool,
    /// JSON file holding the reading log
    pub log_path: PathBuf,
    /// Command reported before any command has been issued
    pub initial_command: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_BACKEND_PORT,
            enable_cors: true,
            log_path: PathBuf::from("soil_data.json"),
            initial_command: "None".to_string(),
        }
    }
}

impl BackendConfig {
    /// Create a new backend configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the host for the backend.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the backend.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable_cors: bool) -> Self {
        self.enable_cors = enable_cors;
        self
    }

    /// Set the reading log file.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn with_initial_command(mut self, command: impl Into<String>) -> Self {
        self.initial_command = command.into();
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
