//! Wire types exchanged with the device backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An actuator directive as understood by the dashboard.
///
/// The six known directives are the ones the device acts on. Any other string the
/// backend reports (it starts out at `"None"`) is carried verbatim in [`Command::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Command {
    MoveMotor,
    StopMotor,
    PlaySound,
    StopSound,
    StartWater,
    StopWater,
    Other(String),
}

impl Command {
    /// Known directives in the order the dashboard offers them.
    pub const ALL: [Command; 6] = [
        Command::MoveMotor,
        Command::StopMotor,
        Command::PlaySound,
        Command::StopSound,
        Command::StartWater,
        Command::StopWater,
    ];

    /// Wire representation of the command.
    pub fn as_str(&self) -> &str {
        match self {
            Command::MoveMotor => "Move Motor",
            Command::StopMotor => "Stop Motor",
            Command::PlaySound => "Play Sound",
            Command::StopSound => "Stop Sound",
            Command::StartWater => "Start Water",
            Command::StopWater => "Stop Water",
            Command::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Command::Other(_))
    }

    /// Parse operator input, matching the known directives case-insensitively.
    ///
    /// The device lowercases before comparing, so `"stop water"` means [`Command::StopWater`].
    /// Text from the backend goes through `From<String>` instead and is kept verbatim.
    pub fn from_input(input: &str) -> Self {
        let lowered = input.trim().to_lowercase();
        Command::ALL
            .into_iter()
            .find(|known| known.as_str().to_lowercase() == lowered)
            .unwrap_or_else(|| Command::Other(input.to_string()))
    }
}

impl From<String> for Command {
    fn from(raw: String) -> Self {
        Command::ALL
            .into_iter()
            .find(|known| known.as_str() == raw)
            .unwrap_or(Command::Other(raw))
    }
}

impl From<&str> for Command {
    fn from(raw: &str) -> Self {
        Command::from(raw.to_string())
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        match command {
            Command::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub command: Command,
}

/// Body of `POST /update-command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandUpdate {
    pub command: Command,
}

/// Body of `POST /data`. The raw text is forwarded; the server validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSubmission {
    pub soil_moisture: String,
}

/// Server acknowledgement returned by `POST /data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

/// State of the `soil_moisture` key on a raw log record.
#[derive(Debug, Clone, PartialEq)]
pub enum MoistureField {
    /// The key is absent from the record
    Missing,
    /// The key is present with an explicit `null`
    Null,
    /// The key carries some JSON value, numeric or not
    Present(Value),
}

/// A log record exactly as the backend returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLogRecord {
    pub timestamp: Option<Value>,
    pub soil_moisture: MoistureField,
    /// Any additional keys on the record
    pub extra: Map<String, Value>,
}

impl RawLogRecord {
    /// Build a well-formed record with a string timestamp.
    pub fn new(timestamp: impl Into<String>, soil_moisture: Option<f64>) -> Self {
        Self {
            timestamp: Some(Value::String(timestamp.into())),
            soil_moisture: match soil_moisture {
                Some(value) => MoistureField::Present(Value::from(value)),
                None => MoistureField::Null,
            },
            extra: Map::new(),
        }
    }
}

impl From<Value> for RawLogRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let timestamp = map.remove("timestamp");
                let soil_moisture = match map.remove("soil_moisture") {
                    None => MoistureField::Missing,
                    Some(Value::Null) => MoistureField::Null,
                    Some(other) => MoistureField::Present(other),
                };
                Self {
                    timestamp,
                    soil_moisture,
                    extra: map,
                }
            }
            // Non-object records have neither key.
            _ => Self {
                timestamp: None,
                soil_moisture: MoistureField::Missing,
                extra: Map::new(),
            },
        }
    }
}

impl<'de> Deserialize<'de> for RawLogRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RawLogRecord::from)
    }
}
