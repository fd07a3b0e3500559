//! The dashboard controller.
//!
//! [`Dashboard`] owns every piece of UI state and is the only place operations
//! are started from. Each operation returns the [`StateDelta`] it applied, so a
//! caller holding a [`DashboardState`] snapshot can fold changes in without
//! re-reading the whole state.

use crate::error::Result;
use crate::remote::{Command, RemoteService};
use crate::series::{ChartConfig, ChartPayload, LogPipeline, Series};
use crate::sync::{CommandSynchronizer, ReadingSubmitter, Settlement, Slot, UpdatePolicy};

/// Snapshot of everything the dashboard displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub command: Option<Command>,
    pub series: Series,
    /// Last acknowledgement message returned for a submitted reading
    pub message: Option<String>,
}

/// A single change produced by a completed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StateDelta {
    Command(Command),
    Series(Series),
    Message(String),
    /// The operation succeeded but a newer one owns the slot
    Unchanged,
}

impl StateDelta {
    fn gated(settlement: Settlement, delta: StateDelta) -> Self {
        match settlement {
            Settlement::Applied => delta,
            Settlement::Stale => StateDelta::Unchanged,
        }
    }
}

impl DashboardState {
    /// Return the state with `delta` applied.
    pub fn apply(mut self, delta: StateDelta) -> Self {
        match delta {
            StateDelta::Command(command) => self.command = Some(command),
            StateDelta::Series(series) => self.series = series,
            StateDelta::Message(message) => self.message = Some(message),
            StateDelta::Unchanged => {}
        }
        self
    }
}

/// Single controller for the soil dashboard.
#[derive(Debug)]
pub struct Dashboard<R> {
    commands: CommandSynchronizer<R>,
    readings: ReadingSubmitter<R>,
    logs: LogPipeline<R>,
    message: Slot<String>,
}

impl<R: RemoteService + Clone> Dashboard<R> {
    pub fn new(remote: R, policy: UpdatePolicy) -> Self {
        Self {
            commands: CommandSynchronizer::new(remote.clone(), policy),
            readings: ReadingSubmitter::new(remote.clone()),
            logs: LogPipeline::new(remote, policy),
            message: Slot::new("message", policy),
        }
    }
}

impl<R: RemoteService> Dashboard<R> {
    /// Re-read the current command from the backend.
    pub async fn refresh_command(&self) -> Result<StateDelta> {
        let (command, settlement) = self.commands.refresh().await?;
        Ok(StateDelta::gated(settlement, StateDelta::Command(command)))
    }

    /// Issue a command; the local value changes as soon as the backend accepts it.
    pub async fn issue_command(&self, command: Command) -> Result<StateDelta> {
        let settlement = self.commands.issue(command.clone()).await?;
        Ok(StateDelta::gated(settlement, StateDelta::Command(command)))
    }

    /// Submit a manual reading and record the acknowledgement for display.
    ///
    /// The displayed series is not touched.
    pub async fn submit_reading(&self, raw_value: &str) -> Result<StateDelta> {
        let ticket = self.message.begin();
        let message = self.readings.submit(raw_value).await?;
        let settlement = self.message.settle(ticket, message.clone());
        Ok(StateDelta::gated(settlement, StateDelta::Message(message)))
    }

    /// Rebuild the displayed series from the backend log.
    pub async fn refresh_log(&self) -> Result<StateDelta> {
        let (series, settlement) = self.logs.refresh().await?;
        Ok(StateDelta::gated(settlement, StateDelta::Series(series)))
    }

    pub fn state(&self) -> DashboardState {
        DashboardState {
            command: self.commands.current(),
            series: self.logs.series(),
            message: self.message.get(),
        }
    }

    /// Chart payload for the series currently on display.
    pub fn chart(&self, config: ChartConfig) -> ChartPayload {
        ChartPayload::new(&self.logs.series(), config)
    }

    pub fn commands(&self) -> &CommandSynchronizer<R> {
        &self.commands
    }

    pub fn logs(&self) -> &LogPipeline<R> {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{project, LogEntry};

    #[test]
    fn test_apply_replaces_series_wholesale() {
        let old = project(&[LogEntry::new("t1", 1.0), LogEntry::new("t2", 2.0)]);
        let new = project(&[LogEntry::new("t3", 3.0)]);

        let state = DashboardState::default()
            .apply(StateDelta::Series(old))
            .apply(StateDelta::Series(new.clone()));
        assert_eq!(state.series, new);
    }

    #[test]
    fn test_unchanged_delta_is_identity() {
        let state = DashboardState::default().apply(StateDelta::Command(Command::StartWater));
        let after = state.clone().apply(StateDelta::Unchanged);
        assert_eq!(state, after);
    }

    #[test]
    fn test_stale_settlement_yields_unchanged() {
        let delta = StateDelta::gated(Settlement::Stale, StateDelta::Message("ok".into()));
        assert_eq!(delta, StateDelta::Unchanged);
    }
}
