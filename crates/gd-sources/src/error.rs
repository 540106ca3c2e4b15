//! Error types for GlobalData tool operations

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while shaping, sending or reading an upstream request
///
/// Every variant is turned into an `{"error": message}` envelope at the
/// tool boundary; none of them escapes to the MCP layer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Date argument is not a real `DD-MM-YYYY` date
    #[error("Invalid date format: '{0}'. Use DD-MM-YYYY.")]
    InvalidDateFormat(String),

    /// Chunk size must be a positive integer
    #[error("Invalid chunk size: {0}. Use a positive integer.")]
    InvalidChunkSize(i64),

    /// DNS, connect, TLS or timeout failure
    #[error("Upstream request failed: {0}")]
    UpstreamTransportFailure(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream HTTP error {status} for url: {url}")]
    UpstreamHttpError {
        status: StatusCode,
        url: String,
    },

    /// Upstream body is not valid JSON
    #[error("Upstream returned malformed JSON: {0}")]
    UpstreamMalformedPayload(String),

    /// No endpoint registered for the tool
    #[error("No endpoint configured for tool: {0}")]
    UnknownEndpoint(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for GlobalData operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Convert SourceError to gd_core::Error
impl From<SourceError> for gd_core::Error {
    fn from(err: SourceError) -> Self {
        gd_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert configuration loading failures to SourceError
impl From<gd_utils::ConfigError> for SourceError {
    fn from(err: gd_utils::ConfigError) -> Self {
        SourceError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::InvalidDateFormat("2024-01-01".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid date format: '2024-01-01'. Use DD-MM-YYYY."
        );

        let err = SourceError::UpstreamHttpError {
            status: StatusCode::NOT_FOUND,
            url: "https://example.test/GetTopThemes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Upstream HTTP error 404 Not Found for url: https://example.test/GetTopThemes"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err = SourceError::UpstreamMalformedPayload("expected value".to_string());
        let core: gd_core::Error = err.into();

        match core {
            gd_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("malformed JSON"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }

    #[test]
    fn test_config_error_conversion() {
        let err: SourceError = gd_utils::ConfigError::EnvVarNotFound("TOKEN".to_string()).into();
        assert!(matches!(err, SourceError::ConfigError(msg) if msg.contains("TOKEN")));
    }
}
