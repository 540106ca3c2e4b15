//! Tool trait definition

use async_trait::async_trait;
use gd_core::Result;
use serde_json::Value;

/// Trait for tools exposed to an invoking agent
///
/// Each tool provides a name, a free-text description used by the caller to
/// pick the right tool, and a JSON schema for its arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given arguments
    ///
    /// # Arguments
    ///
    /// * `params` - Tool arguments as a JSON object (should match input_schema)
    ///
    /// # Returns
    ///
    /// The tool's result envelope. `Err` is reserved for calls that could not
    /// be interpreted at all, such as missing or mistyped arguments.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "Keyword": { "type": "string" },
    ///         "FromDate": { "type": "string" },
    ///         "ToDate": { "type": "string" }
    ///     },
    ///     "required": ["Keyword", "FromDate", "ToDate"]
    /// });
    /// assert!(schema["required"].is_array());
    /// ```
    fn input_schema(&self) -> Value;
}
