//! Error types for MCP operations

use thiserror::Error;

/// Errors that can occur while serving MCP
#[derive(Error, Debug)]
pub enum MCPError {
    /// Listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    BindFailed {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport failed while serving
    #[error("MCP transport failed: {0}")]
    TransportFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convert MCPError to gd_core::Error
impl From<MCPError> for gd_core::Error {
    fn from(err: MCPError) -> Self {
        gd_core::Error::ProcessingFailed(err.to_string())
    }
}
