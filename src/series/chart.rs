//! Rendering configuration handed to the chart renderer with the series.

use crate::series::project::Series;
use serde::{Deserialize, Serialize};

/// Legend and axis settings for the moisture chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub dataset_label: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_position: String,
    pub line_color: String,
    /// Curve smoothing, 0.0 draws straight segments
    pub tension: f32,
    pub y_begins_at_zero: bool,
    /// Rotation applied to x-axis tick labels, in degrees
    pub tick_rotation_degrees: u16,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Soil Moisture Over Time".to_string(),
            dataset_label: "Soil Moisture Level".to_string(),
            x_axis_title: "Timestamp".to_string(),
            y_axis_title: "Moisture Level".to_string(),
            legend_position: "top".to_string(),
            line_color: "blue".to_string(),
            tension: 0.1,
            y_begins_at_zero: true,
            tick_rotation_degrees: 45,
        }
    }
}

impl ChartConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }
}

/// Everything a renderer needs to draw one chart.
///
/// Tick labels are computed from the series it was built from, so a payload is
/// rebuilt together with its series and never reused across refreshes.
/// Unplottable values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub config: ChartConfig,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl ChartPayload {
    pub fn new(series: &Series, config: ChartConfig) -> Self {
        Self {
            config,
            labels: series.labels.clone(),
            values: series.values.clone(),
            tick_labels: series.tick_labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{ingest::LogEntry, project::project};

    #[test]
    fn test_payload_carries_tick_labels() {
        let series = project(&[
            LogEntry::new("2024-05-01 08:00:00", 40.0),
            LogEntry::new("2024-05-01 09:00:00", f64::NAN),
        ]);
        let payload = ChartPayload::new(&series, ChartConfig::default());
        assert_eq!(payload.tick_labels, vec!["08:00:00", "09:00:00"]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["values"][0], 40.0);
        assert!(json["values"][1].is_null());
        assert_eq!(json["config"]["title"], "Soil Moisture Over Time");
    }
}
