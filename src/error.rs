//! Error handling for the soil dashboard crate.

/// A specialized `Result` type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// The main error type for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The request never produced a response (connect, read or timeout failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but did not have the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A reading could not be submitted
    #[error("Reading submission failed: {0}")]
    Submission(#[source] Box<DashboardError>),

    /// The reading input was empty, so nothing was sent
    #[error("Reading value is required")]
    EmptyReading,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Log storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Create a new transport error
    pub fn transport_error(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new protocol error
    pub fn protocol_error(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Wrap a failed round-trip as a submission error
    pub fn submission_error(cause: DashboardError) -> Self {
        Self::Submission(Box::new(cause))
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new storage error
    pub fn storage_error(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }
}
