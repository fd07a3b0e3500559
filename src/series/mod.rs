//! Log ingestion and chart series projection.
//!
//! Raw log records are filtered and coerced into [`LogEntry`] values, which are then
//! projected into a [`Series`] of labels and values plus a tick-label function.

pub mod chart;
pub mod ingest;
pub mod project;

// Re-export commonly used items
pub use chart::{ChartConfig, ChartPayload};
pub use ingest::{coerce_moisture, ingest_records, CoercionError, LogEntry, LogPipeline};
pub use project::{axis_label, project, Series};
