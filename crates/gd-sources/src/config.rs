//! Configuration for the GlobalData tool servers
//!
//! Credentials are loaded once at startup (config file and/or environment)
//! and stay unchanged for the lifetime of the process.

use crate::error::{Result, SourceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default upstream host
pub const DEFAULT_BASE_URL: &str = "https://apidata.globaldata.com";

/// Display name sent to the social-media API unless overridden
pub const DEFAULT_DISPLAY_NAME: &str = "POC";

/// AI Hub answers can take many minutes to assemble
pub const DEFAULT_AIHUB_TIMEOUT_SECS: u64 = 1000;

/// Static secret attached to every upstream call
///
/// Debug output never shows the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for placing on the wire
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty or blank
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Configuration shared by both deployable units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Scheme and host of the GlobalData API
    pub base_url: String,

    /// `TokenID` for the social-media API
    pub social_token: Option<Credential>,

    /// Bearer token for the AI Hub API
    pub aihub_token: Option<Credential>,

    /// `DisplayName` query parameter for the social-media API
    pub display_name: String,

    /// Request timeout for social-media calls (none by default)
    pub social_timeout_secs: Option<u64>,

    /// Request timeout for AI Hub calls
    pub aihub_timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            social_token: None,
            aihub_token: None,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            social_timeout_secs: None,
            aihub_timeout_secs: Some(DEFAULT_AIHUB_TIMEOUT_SECS),
        }
    }
}

impl SourceConfig {
    /// Create a new configuration builder
    pub fn builder() -> SourceConfigBuilder {
        SourceConfigBuilder::default()
    }

    /// Load configuration: optional JSON file first, environment on top
    ///
    /// Recognized variables: `GLOBALDATA_BASE_URL`, `GLOBALDATA_SOCIAL_TOKEN`,
    /// `GLOBALDATA_AIHUB_TOKEN`, `GLOBALDATA_DISPLAY_NAME`,
    /// `GLOBALDATA_TIMEOUT_SECS` (applies to both units).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => gd_utils::load_json_file(path)?,
            None => Self::default(),
        };

        let config = base.with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `GLOBALDATA_*` environment overrides
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("GLOBALDATA_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(token) = std::env::var("GLOBALDATA_SOCIAL_TOKEN") {
            self.social_token = Some(Credential::new(token));
        }
        if let Ok(token) = std::env::var("GLOBALDATA_AIHUB_TOKEN") {
            self.aihub_token = Some(Credential::new(token));
        }
        if let Ok(name) = std::env::var("GLOBALDATA_DISPLAY_NAME") {
            self.display_name = name;
        }
        if let Ok(secs) = std::env::var("GLOBALDATA_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SourceError::ConfigError(format!(
                    "GLOBALDATA_TIMEOUT_SECS must be a number of seconds, got '{secs}'"
                ))
            })?;
            self.social_timeout_secs = Some(secs);
            self.aihub_timeout_secs = Some(secs);
        }
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// Tokens are checked per unit when the unit starts, see
    /// [`SourceConfig::social_credential`] and [`SourceConfig::aihub_credential`].
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            SourceError::ConfigError(format!("Invalid base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::ConfigError(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.display_name.trim().is_empty() {
            return Err(SourceError::ConfigError(
                "display_name must not be empty".to_string(),
            ));
        }

        if self.social_timeout_secs == Some(0) || self.aihub_timeout_secs == Some(0) {
            return Err(SourceError::ConfigError(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Social-media `TokenID`, required by `social-server`
    pub fn social_credential(&self) -> Result<&Credential> {
        Self::require(self.social_token.as_ref(), "GLOBALDATA_SOCIAL_TOKEN")
    }

    /// AI Hub bearer token, required by `aihub-server`
    pub fn aihub_credential(&self) -> Result<&Credential> {
        Self::require(self.aihub_token.as_ref(), "GLOBALDATA_AIHUB_TOKEN")
    }

    /// Social-media request timeout
    pub fn social_timeout(&self) -> Option<Duration> {
        self.social_timeout_secs.map(Duration::from_secs)
    }

    /// AI Hub request timeout
    pub fn aihub_timeout(&self) -> Option<Duration> {
        self.aihub_timeout_secs.map(Duration::from_secs)
    }

    fn require<'a>(token: Option<&'a Credential>, var: &str) -> Result<&'a Credential> {
        token.filter(|t| !t.is_blank()).ok_or_else(|| {
            SourceError::ConfigError(format!(
                "credential missing: set {var} or provide it in the config file"
            ))
        })
    }
}

/// Builder for SourceConfig
#[derive(Debug, Default)]
pub struct SourceConfigBuilder {
    base_url: Option<String>,
    social_token: Option<Credential>,
    aihub_token: Option<Credential>,
    display_name: Option<String>,
    social_timeout_secs: Option<u64>,
    aihub_timeout_secs: Option<u64>,
}

impl SourceConfigBuilder {
    /// Set the upstream base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the social-media `TokenID`
    pub fn social_token(mut self, token: impl Into<String>) -> Self {
        self.social_token = Some(Credential::new(token));
        self
    }

    /// Set the AI Hub bearer token
    pub fn aihub_token(mut self, token: impl Into<String>) -> Self {
        self.aihub_token = Some(Credential::new(token));
        self
    }

    /// Override the `DisplayName` default
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the social-media request timeout in whole seconds
    pub fn social_timeout_secs(mut self, secs: u64) -> Self {
        self.social_timeout_secs = Some(secs);
        self
    }

    /// Set the AI Hub request timeout in whole seconds
    pub fn aihub_timeout_secs(mut self, secs: u64) -> Self {
        self.aihub_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SourceConfig> {
        let defaults = SourceConfig::default();

        let config = SourceConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            social_token: self.social_token,
            aihub_token: self.aihub_token,
            display_name: self.display_name.unwrap_or(defaults.display_name),
            social_timeout_secs: self.social_timeout_secs.or(defaults.social_timeout_secs),
            aihub_timeout_secs: self.aihub_timeout_secs.or(defaults.aihub_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.display_name, "POC");
        assert_eq!(config.social_timeout(), None);
        assert_eq!(config.aihub_timeout(), Some(Duration::from_secs(1000)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SourceConfig::builder()
            .base_url("http://127.0.0.1:9000/")
            .social_token("tok")
            .display_name("Analyst")
            .social_timeout_secs(5)
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.social_credential().unwrap().expose(), "tok");
        assert_eq!(config.display_name, "Analyst");
        assert_eq!(config.social_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_credentials() {
        let config = SourceConfig::builder().aihub_token("  ").build().unwrap();
        assert!(config.social_credential().is_err());

        let err = config.aihub_credential().unwrap_err();
        assert!(err.to_string().contains("GLOBALDATA_AIHUB_TOKEN"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(SourceConfig::builder().base_url("not a url").build().is_err());
        assert!(SourceConfig::builder().base_url("ftp://example.test").build().is_err());
        assert!(SourceConfig::builder().display_name(" ").build().is_err());
        assert!(SourceConfig::builder().aihub_timeout_secs(0).build().is_err());
        assert!(SourceConfig::builder().social_timeout_secs(0).build().is_err());
    }

    #[test]
    fn test_builder_timeouts_in_seconds() {
        let config = SourceConfig::builder()
            .social_timeout_secs(90)
            .aihub_timeout_secs(1)
            .build()
            .unwrap();

        assert_eq!(config.social_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.aihub_timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let config = SourceConfig::builder().social_token("super-secret").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Credential(***)"));
    }

    #[test]
    fn test_deserialize_partial_file() {
        let config: SourceConfig =
            serde_json::from_str(r#"{"social_token": "abc", "display_name": "Desk"}"#).unwrap();
        assert_eq!(config.social_credential().unwrap().expose(), "abc");
        assert_eq!(config.display_name, "Desk");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.aihub_timeout_secs, Some(DEFAULT_AIHUB_TIMEOUT_SECS));
    }

    const ENV_VARS: [&str; 5] = [
        "GLOBALDATA_BASE_URL",
        "GLOBALDATA_SOCIAL_TOKEN",
        "GLOBALDATA_AIHUB_TOKEN",
        "GLOBALDATA_DISPLAY_NAME",
        "GLOBALDATA_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    fn set_env(var: &str, value: &str) {
        unsafe {
            std::env::set_var(var, value);
        }
    }

    // The GLOBALDATA_* variables are process-wide, so every load scenario
    // runs inside this one test.
    #[test]
    fn test_load_file_then_env() {
        clear_env();
        set_env("GD_SOURCES_FILE_AIHUB_TOKEN", "hub-from-env-ref");

        let path = std::env::temp_dir().join(format!("gd-sources-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "base_url": "http://file.test",
                "social_token": "file-token",
                "aihub_token": "${GD_SOURCES_FILE_AIHUB_TOKEN}",
                "display_name": "Desk",
                "aihub_timeout_secs": 30
            }"#,
        )
        .unwrap();

        // File only
        let config = SourceConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.base_url(), "http://file.test");
        assert_eq!(config.social_credential().unwrap().expose(), "file-token");
        assert_eq!(config.aihub_credential().unwrap().expose(), "hub-from-env-ref");
        assert_eq!(config.display_name, "Desk");
        assert_eq!(config.social_timeout(), None);
        assert_eq!(config.aihub_timeout(), Some(Duration::from_secs(30)));

        // Environment overrides the file
        set_env("GLOBALDATA_BASE_URL", "http://env.test");
        set_env("GLOBALDATA_SOCIAL_TOKEN", "env-token");
        let config = SourceConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.base_url(), "http://env.test");
        assert_eq!(config.social_credential().unwrap().expose(), "env-token");
        assert_eq!(config.display_name, "Desk");

        // One timeout variable sets both units
        set_env("GLOBALDATA_TIMEOUT_SECS", " 45 ");
        let config = SourceConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.social_timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.aihub_timeout(), Some(Duration::from_secs(45)));

        set_env("GLOBALDATA_TIMEOUT_SECS", "soon");
        let err = SourceConfig::load(Some(path.as_path())).unwrap_err();
        assert!(
            matches!(&err, SourceError::ConfigError(msg) if msg.contains("GLOBALDATA_TIMEOUT_SECS")),
            "unexpected error: {err}"
        );

        set_env("GLOBALDATA_TIMEOUT_SECS", "0");
        assert!(SourceConfig::load(Some(path.as_path())).is_err());

        // No file: defaults plus environment
        set_env("GLOBALDATA_TIMEOUT_SECS", "5");
        set_env("GLOBALDATA_DISPLAY_NAME", "Analyst");
        let config = SourceConfig::load(None).unwrap();
        assert_eq!(config.display_name, "Analyst");
        assert!(config.aihub_credential().is_err());

        std::fs::remove_file(&path).ok();
        assert!(SourceConfig::load(Some(path.as_path())).is_err());

        clear_env();
    }
}
