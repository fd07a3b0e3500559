//! Series projection: chart-ready labels and values from ingested entries.

use crate::series::ingest::LogEntry;
use serde::{Deserialize, Serialize};

/// Ordered (label, value) pairs for the moisture chart.
///
/// Deserializing rebuilds `labels` and `values` from the stored entries, so the
/// three always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSeries")]
pub struct Series {
    /// Full timestamps, used as the x-axis categories
    pub labels: Vec<String>,
    /// Moisture values in the same order
    pub values: Vec<f64>,
    entries: Vec<LogEntry>,
}

#[derive(Deserialize)]
struct StoredSeries {
    #[serde(default)]
    entries: Vec<LogEntry>,
}

impl From<StoredSeries> for Series {
    fn from(stored: StoredSeries) -> Self {
        project(&stored.entries)
    }
}

impl Series {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Short tick label for the point at `index`. See [`axis_label`].
    pub fn axis_label(&self, index: usize) -> String {
        axis_label(&self.entries, index)
    }

    /// Tick labels for every point.
    pub fn tick_labels(&self) -> Vec<String> {
        (0..self.len()).map(|i| self.axis_label(i)).collect()
    }
}

/// Build the chart series for `entries`, preserving their order.
pub fn project(entries: &[LogEntry]) -> Series {
    Series {
        labels: entries.iter().map(|e| e.timestamp.clone()).collect(),
        values: entries.iter().map(|e| e.soil_moisture).collect(),
        entries: entries.to_vec(),
    }
}

/// Time-of-day part of the timestamp at `index`.
///
/// Returns the text between the first and second space of the timestamp, so
/// `"2024-01-01 14:30:00"` yields `"14:30:00"`. Out-of-range indices and
/// timestamps without a space yield an empty string.
pub fn axis_label(entries: &[LogEntry], index: usize) -> String {
    entries
        .get(index)
        .and_then(|entry| entry.timestamp.split(' ').nth(1))
        .unwrap_or_default()
        .to_string()
}
