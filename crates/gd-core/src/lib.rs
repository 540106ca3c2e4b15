//! Core abstractions for the GlobalData MCP tool servers
//!
//! This crate defines the error type that crosses crate boundaries: tools
//! report failures through it and the MCP layer turns it into a tool error.

pub mod error;

pub use error::{Error, Result};
