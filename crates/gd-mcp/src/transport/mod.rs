//! Transports serving the MCP handler

pub mod http;
pub mod stdio;
