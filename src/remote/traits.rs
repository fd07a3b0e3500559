//! Traits for talking to the device backend.

use crate::error::Result;
use crate::remote::data::{Acknowledgement, Command, RawLogRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// The four remote operations the dashboard depends on.
///
/// Each call is a single round-trip with no retry and no caching. Implementations
/// report connection failures as `Transport` errors and unexpected response shapes as
/// `Protocol` errors.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Fetch the command currently stored on the backend.
    async fn get_command(&self) -> Result<Command>;

    /// Store a new command. Success only means the backend accepted it.
    async fn set_command(&self, command: &Command) -> Result<()>;

    /// Forward a raw reading; the backend is the validation authority.
    async fn submit_reading(&self, raw_value: &str) -> Result<Acknowledgement>;

    /// Fetch the full reading log in server order.
    async fn get_log(&self) -> Result<Vec<RawLogRecord>>;
}

#[async_trait]
impl<T: RemoteService + ?Sized> RemoteService for Arc<T> {
    async fn get_command(&self) -> Result<Command> {
        (**self).get_command().await
    }

    async fn set_command(&self, command: &Command) -> Result<()> {
        (**self).set_command(command).await
    }

    async fn submit_reading(&self, raw_value: &str) -> Result<Acknowledgement> {
        (**self).submit_reading(raw_value).await
    }

    async fn get_log(&self) -> Result<Vec<RawLogRecord>> {
        (**self).get_log().await
    }
}
