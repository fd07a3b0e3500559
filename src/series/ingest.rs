//! Log ingestion: turns the raw log feed into ordered, numeric entries.

use crate::error::Result;
use crate::remote::{MoistureField, RawLogRecord, RemoteService};
use crate::series::project::{project, Series};
use crate::sync::slot::{Settlement, Slot, UpdatePolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// A server-confirmed reading, normalized for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp string exactly as the server sent it
    pub timestamp: String,
    /// Moisture value; `NaN` when the raw value could not be read as a number
    #[serde(deserialize_with = "nan_from_null")]
    pub soil_moisture: f64,
}

// `NaN` serializes as `null`, so read it back the same way.
fn nan_from_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|value| value.unwrap_or(f64::NAN))
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, soil_moisture: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            soil_moisture,
        }
    }

    /// Whether the entry plots as a real point.
    pub fn is_valid(&self) -> bool {
        !self.soil_moisture.is_nan()
    }
}

/// Why a raw moisture value could not be read as a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    #[error("soil_moisture key is missing")]
    Missing,
    #[error("'{0}' is not numeric")]
    NotNumeric(String),
}

/// Read a raw moisture field as a number using dynamic-language coercion rules.
///
/// Numbers pass through, strings are trimmed and parsed (empty means `0`), booleans
/// map to `1`/`0` and an explicit null to `0`. Everything else fails.
pub fn coerce_moisture(field: &MoistureField) -> std::result::Result<f64, CoercionError> {
    match field {
        MoistureField::Missing => Err(CoercionError::Missing),
        MoistureField::Null => Ok(0.0),
        MoistureField::Present(value) => coerce_value(value),
    }
}

fn coerce_value(value: &Value) -> std::result::Result<f64, CoercionError> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| CoercionError::NotNumeric(number.to_string())),
        Value::String(text) => parse_numeric_text(text),
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        Value::Null => Ok(0.0),
        other => Err(CoercionError::NotNumeric(other.to_string())),
    }
}

fn parse_numeric_text(text: &str) -> std::result::Result<f64, CoercionError> {
    let trimmed = text.trim();
    let not_numeric = || CoercionError::NotNumeric(text.to_string());

    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Ok(f64::INFINITY),
        "-Infinity" => return Ok(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // Prefixed literals are unsigned: digits only, no sign after the prefix.
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return Err(not_numeric());
        }
        return digits
            .chars()
            .try_fold(0.0, |acc: f64, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .ok_or_else(not_numeric);
    }

    // f64's parser also takes "inf" and "nan", which are not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return Err(not_numeric());
    }

    trimmed.parse::<f64>().map_err(|_| not_numeric())
}

fn timestamp_text(timestamp: Option<Value>) -> String {
    match timestamp {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Filter and normalize raw records, keeping server order.
///
/// Records with an explicit null moisture are dropped. Records whose value cannot
/// be read as a number, including those missing the key entirely, are kept with a
/// `NaN` value.
pub fn ingest_records(records: Vec<RawLogRecord>) -> Vec<LogEntry> {
    let total = records.len();
    let entries: Vec<LogEntry> = records
        .into_iter()
        .filter(|record| record.soil_moisture != MoistureField::Null)
        .map(|record| {
            let soil_moisture = match coerce_moisture(&record.soil_moisture) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Keeping log entry with unreadable moisture: {}", e);
                    f64::NAN
                }
            };
            LogEntry {
                timestamp: timestamp_text(record.timestamp),
                soil_moisture,
            }
        })
        .collect();

    debug!(
        "Ingested {} of {} log records ({} null)",
        entries.len(),
        total,
        total - entries.len()
    );
    entries
}

/// Fetches the log and keeps the projected series for display.
#[derive(Debug)]
pub struct LogPipeline<R> {
    remote: R,
    series: Slot<Series>,
}

impl<R: RemoteService> LogPipeline<R> {
    pub fn new(remote: R, policy: UpdatePolicy) -> Self {
        Self {
            remote,
            series: Slot::new("series", policy),
        }
    }

    /// Fetch the full log and return its ingested entries.
    pub async fn ingest(&self) -> Result<Vec<LogEntry>> {
        let records = self.remote.get_log().await?;
        Ok(ingest_records(records))
    }

    /// Rebuild the displayed series from a fresh log.
    ///
    /// The previous series is replaced wholesale on success and kept on failure.
    pub async fn refresh(&self) -> Result<(Series, Settlement)> {
        let ticket = self.series.begin();
        let entries = self.ingest().await.map_err(|e| {
            warn!("Log refresh failed, keeping previous series: {}", e);
            e
        })?;

        let series = project(&entries);
        let settlement = self.series.settle(ticket, series.clone());
        if settlement == Settlement::Applied {
            info!("Series rebuilt with {} points", series.len());
        }
        Ok((series, settlement))
    }

    /// The series currently on display; empty before the first refresh.
    pub fn series(&self) -> Series {
        self.series.get().unwrap_or_default()
    }
}
