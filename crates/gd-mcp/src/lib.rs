//! Model Context Protocol (MCP) server for the GlobalData tool servers
//!
//! This crate exposes a [`gd_tools::ToolRegistry`] to MCP clients:
//! - an [`rmcp::ServerHandler`] that lists and calls the registered tools
//! - stdio transport
//! - stateless streamable-HTTP transport mounted at `/mcp`
//!
//! # Example
//!
//! ```no_run
//! use gd_mcp::McpServer;
//! use gd_tools::ToolRegistry;
//! use gd_utils::{ServerSettings, Transport};
//!
//! # async fn example() -> Result<(), gd_mcp::MCPError> {
//! let settings = ServerSettings::new("web-search", "0.1.0", 10000)
//!     .with_transport(Transport::Stdio);
//! let server = McpServer::new(&settings, ToolRegistry::new());
//! server.run(&settings).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod server;
pub mod transport;

pub use error::MCPError;
pub use server::McpServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
