//! Error types for gd-core

use thiserror::Error;

/// Result type alias for gd-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Tool arguments did not match the tool's input schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Tool processing failed
    #[error("Tool processing failed: {0}")]
    ProcessingFailed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidArguments(err.to_string())
    }
}
