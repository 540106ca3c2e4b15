//! Shared utilities for the GlobalData MCP tool servers
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup, server settings, and configuration-file helpers.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ServerSettings, Transport, load_json_file, resolve_env_string};
pub use logging::init_tracing;
