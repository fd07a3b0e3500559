//! Manual soil-moisture reading submission.

use crate::error::{DashboardError, Result};
use crate::remote::RemoteService;
use tracing::{info, warn};

/// Validates and forwards a single operator-entered reading.
#[derive(Debug)]
pub struct ReadingSubmitter<R> {
    remote: R,
}

impl<R: RemoteService> ReadingSubmitter<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    /// Submit `raw_value` and return the server's acknowledgement message verbatim.
    ///
    /// Empty input is rejected before any request is made. Numeric validation is
    /// left to the server. A round-trip that cannot complete surfaces as
    /// [`DashboardError::Submission`]. No local state is touched; the reading only
    /// becomes visible after the next log refresh.
    pub async fn submit(&self, raw_value: &str) -> Result<String> {
        if raw_value.trim().is_empty() {
            return Err(DashboardError::EmptyReading);
        }

        match self.remote.submit_reading(raw_value).await {
            Ok(ack) => {
                info!("Reading '{}' acknowledged: {}", raw_value, ack.message);
                Ok(ack.message)
            }
            Err(e) => {
                warn!("Reading '{}' was not submitted: {}", raw_value, e);
                Err(DashboardError::submission_error(e))
            }
        }
    }
}
