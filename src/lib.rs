//! # Soil Dashboard
//!
//! Client-side core for a remote soil-monitoring device. The crate keeps the
//! dashboard's view of the device in sync with its backend and turns the
//! backend's raw reading log into a chart-ready series.
//!
//! ## Features
//!
//! - **Command synchronization**: fetch and issue actuator commands with an
//!   explicit policy for overlapping round-trips
//! - **Reading submission**: forward manual soil-moisture readings
//! - **Log ingestion**: filter and coerce the raw log without reordering it
//! - **Series projection**: labels, values and time-of-day tick labels
//! - **Reference backend**: an axum server speaking the same HTTP surface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soil_dashboard::{ClientConfig, Command, Dashboard, HttpRemote, UpdatePolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let remote = HttpRemote::new(ClientConfig::new("http://127.0.0.1:5000"))?;
//!     let dashboard = Dashboard::new(remote, UpdatePolicy::default());
//!
//!     dashboard.issue_command(Command::StartWater).await?;
//!     dashboard.refresh_log().await?;
//!     println!("{} points", dashboard.state().series.len());
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod error;
pub mod remote;
pub mod series;
pub mod sync;
pub mod web;

// Re-export public API
pub use dashboard::{Dashboard, DashboardState, StateDelta};
pub use error::{DashboardError, Result};
pub use remote::{
    Acknowledgement, ClientConfig, Command, HttpRemote, MoistureField, RawLogRecord,
    RemoteService,
};
pub use series::{
    axis_label, ingest_records, project, ChartConfig, ChartPayload, LogEntry, LogPipeline, Series,
};
pub use sync::{CommandSynchronizer, ReadingSubmitter, Settlement, UpdatePolicy};
pub use web::{start_backend, BackendConfig};

/// The default backend base URL
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// The default backend port
pub const DEFAULT_BACKEND_PORT: u16 = 5000;

/// The default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
