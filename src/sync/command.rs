//! Keeps the dashboard's notion of the current actuator command.

use crate::error::Result;
use crate::remote::{Command, RemoteService};
use crate::sync::slot::{Settlement, Slot, UpdatePolicy};
use tracing::{info, warn};

/// Owner of the current command as known to the UI.
///
/// `refresh` and `issue` are independent round-trips. Which of two overlapping
/// calls ends up in [`CommandSynchronizer::current`] is decided by the slot's
/// [`UpdatePolicy`].
#[derive(Debug)]
pub struct CommandSynchronizer<R> {
    remote: R,
    current: Slot<Command>,
}

impl<R: RemoteService> CommandSynchronizer<R> {
    pub fn new(remote: R, policy: UpdatePolicy) -> Self {
        Self {
            remote,
            current: Slot::new("command", policy),
        }
    }

    /// The last command fetched or successfully issued, if any.
    pub fn current(&self) -> Option<Command> {
        self.current.get()
    }

    /// Fetch the backend's command and adopt it.
    ///
    /// On failure the current command is left untouched and the error returned.
    pub async fn refresh(&self) -> Result<(Command, Settlement)> {
        let ticket = self.current.begin();
        let command = self.remote.get_command().await.map_err(|e| {
            warn!("Command refresh failed: {}", e);
            e
        })?;

        let settlement = self.current.settle(ticket, command.clone());
        if settlement == Settlement::Applied {
            info!("Current command refreshed: {}", command);
        }
        Ok((command, settlement))
    }

    /// Send a command and adopt it locally once the backend accepts it.
    ///
    /// The backend is not re-queried to confirm the change.
    pub async fn issue(&self, command: Command) -> Result<Settlement> {
        let ticket = self.current.begin();
        self.remote.set_command(&command).await.map_err(|e| {
            warn!("Issuing '{}' failed: {}", command, e);
            e
        })?;

        let settlement = self.current.settle(ticket, command.clone());
        if settlement == Settlement::Applied {
            info!("Current command issued: {}", command);
        }
        Ok(settlement)
    }
}
