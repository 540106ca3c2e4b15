//! Tool definitions and lookup for the GlobalData MCP tool servers
//!
//! A tool is a named operation with a JSON Schema for its arguments. Servers
//! register their tools once at startup and dispatch calls by name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
