use thiserror::Error;

pub type Result<T> = std::result::Result<T, ColwmError>;

#[derive(Debug, Error)]
pub enum ColwmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Unable to connect to the display server: {0}")]
    DisplayConnection(String),
}

/// Failure of a single request sent to the display server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// The surface went away before its destroy notification reached us.
    #[error("Target window no longer exists")]
    TargetGone,
    #[error("Protocol error: {0}")]
    Protocol(String),
}
