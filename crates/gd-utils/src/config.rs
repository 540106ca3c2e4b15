//! Configuration management utilities
//!
//! Server settings shared by every deployable unit, plus loading of JSON
//! configuration files with `${VAR}` / `$VAR` environment interpolation
//! (`$$` for a literal `$`).

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static ENV_REF: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
});

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable referenced by the configuration is not set
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// Invalid interpolation pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Configuration file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid for the target type
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Transport the MCP server listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// Stateless streamable HTTP (JSON-RPC over POST)
    #[default]
    Http,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "streamable-http" => Ok(Self::Http),
            other => Err(format!("unknown transport '{other}' (expected stdio or http)")),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Settings for one deployable MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server name announced during `initialize`
    pub name: String,
    /// Server version announced during `initialize`
    pub version: String,
    /// Bind address for the HTTP transport
    pub host: String,
    /// Port for the HTTP transport
    pub port: u16,
    /// Transport to serve on
    pub transport: Transport,
}

impl ServerSettings {
    /// Create settings with the default bind host (`0.0.0.0`) and HTTP transport
    pub fn new(name: impl Into<String>, version: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            host: "0.0.0.0".to_string(),
            port,
            transport: Transport::default(),
        }
    }

    /// Override the bind host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the transport
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolve environment variable references in strings
///
/// Supports `${VAR}` and `$VAR` syntax; `$$` yields a literal `$`. Each
/// reference is replaced in a single pass, so substituted values are never
/// rescanned.
///
/// # Example
///
/// ```
/// # use gd_utils::config::resolve_env_string;
/// let plain = resolve_env_string("no variables here")?;
/// assert_eq!(plain, "no variables here");
///
/// let price = resolve_env_string("R$$10")?;
/// assert_eq!(price, "R$10");
/// # Ok::<(), gd_utils::config::ConfigError>(())
/// ```
pub fn resolve_env_string(s: &str) -> Result<String, ConfigError> {
    let pattern = ENV_REF
        .as_ref()
        .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

    let mut missing = None;
    let result = pattern.replace_all(s, |cap: &regex::Captures<'_>| {
        let Some(name) = cap.get(1).or_else(|| cap.get(2)) else {
            return "$".to_string();
        };
        std::env::var(name.as_str()).unwrap_or_else(|_| {
            missing.get_or_insert_with(|| name.as_str().to_string());
            String::new()
        })
    });

    match missing {
        Some(name) => Err(ConfigError::EnvVarNotFound(name)),
        None => Ok(result.into_owned()),
    }
}

/// Resolve environment references in every string of a JSON document
fn resolve_env_value(value: &mut Value) -> Result<(), ConfigError> {
    match value {
        Value::String(s) => {
            *s = resolve_env_string(s)?;
        }
        Value::Array(items) => {
            for item in items {
                resolve_env_value(item)?;
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                resolve_env_value(item)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// Load a JSON configuration file into `T`
///
/// Environment references in string values are resolved before
/// deserialization, so secrets can stay out of the file.
pub fn load_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mut raw: Value = serde_json::from_str(&content)?;
    resolve_env_value(&mut raw)?;
    Ok(serde_json::from_value(raw)?)
}
