//! MCP server handler
//!
//! Bridges rmcp's [`ServerHandler`] onto a [`ToolRegistry`]: `tools/list`
//! advertises every registered tool and `tools/call` dispatches by name.
//! Transport-agnostic; see [`crate::transport`].

use gd_tools::ToolRegistry;
use gd_utils::{ServerSettings, Transport};
use rmcp::{
    ErrorData, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::Result;
use crate::transport;

/// MCP server exposing the tools of a registry
///
/// Cheap to clone; the registry is shared read-only.
#[derive(Clone)]
pub struct McpServer {
    name: String,
    version: String,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server announcing the name and version from `settings`
    pub fn new(settings: &ServerSettings, registry: ToolRegistry) -> Self {
        Self {
            name: settings.name.clone(),
            version: settings.version.clone(),
            registry: Arc::new(registry),
        }
    }

    /// Name announced to clients
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered tools
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the transport selected in `settings` until it closes
    pub async fn run(&self, settings: &ServerSettings) -> Result<()> {
        info!(
            "Starting MCP server '{}' with {} tools on {} transport",
            self.name,
            self.registry.len(),
            settings.transport
        );

        match settings.transport {
            Transport::Stdio => transport::stdio::serve_stdio(self.clone()).await,
            Transport::Http => transport::http::serve(self.clone(), &settings.bind_address()).await,
        }
    }

    /// Tool definitions advertised by `tools/list`, sorted by name
    pub fn tool_definitions(&self) -> Vec<Tool> {
        self.registry
            .list_tools()
            .iter()
            .map(|tool| {
                let schema = match tool.input_schema() {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    Arc::new(schema),
                )
            })
            .collect()
    }

    /// Run a tool and wrap its envelope as an MCP result
    ///
    /// Unknown tools and undecodable arguments come back with `isError` set.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = Value::Object(arguments.unwrap_or_default());
        info!("Calling tool: {}", name);

        match self.registry.call(name, arguments).await {
            Ok(envelope @ Value::Object(_)) => CallToolResult::structured(envelope),
            Ok(envelope) => CallToolResult::success(vec![Content::text(envelope.to_string())]),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                title: None,
                version: self.version.clone(),
                icons: None,
                website_url: None,
            },
            instructions: None,
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<ListToolsResult, ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_definitions(),
            next_cursor: None,
            meta: None,
        }))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<CallToolResult, ErrorData>> + Send + '_
    {
        async move { Ok(self.invoke(&request.name, request.arguments).await) }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    pub(crate) struct KeywordTool;

    #[async_trait]
    impl gd_tools::Tool for KeywordTool {
        async fn execute(&self, params: Value) -> gd_core::Result<Value> {
            let keyword = params
                .get("Keyword")
                .and_then(Value::as_str)
                .ok_or_else(|| gd_core::Error::InvalidArguments("missing field `Keyword`".into()))?;
            if keyword == "list" {
                return Ok(json!([keyword]));
            }
            Ok(json!({ "result": { "keyword": keyword } }))
        }

        fn name(&self) -> &str {
            "GetTopThemes"
        }

        fn description(&self) -> &str {
            "Top themes for a keyword"
        }

        fn input_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "Keyword": { "type": "string" } },
                "required": ["Keyword"]
            })
        }
    }

    pub(crate) fn server() -> McpServer {
        let settings = ServerSettings::new("web-search", "0.1.0", 10000);
        McpServer::new(&settings, ToolRegistry::new().with_tool(Arc::new(KeywordTool)))
    }

    fn arguments(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_get_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "web-search");
        assert_eq!(info.server_info.version, "0.1.0");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_tool_definitions() {
        let tools = server().tool_definitions();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "GetTopThemes");
        assert_eq!(tools[0].description.as_deref(), Some("Top themes for a keyword"));
        assert_eq!(tools[0].input_schema["required"], json!(["Keyword"]));
    }

    #[tokio::test]
    async fn test_invoke_object_envelope_is_structured() {
        let result = server()
            .invoke("GetTopThemes", arguments(json!({"Keyword": "acme"})))
            .await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({"result": {"keyword": "acme"}}))
        );
        let text: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(text, json!({"result": {"keyword": "acme"}}));
    }

    #[tokio::test]
    async fn test_invoke_array_envelope_is_text_only() {
        let result = server()
            .invoke("GetTopThemes", arguments(json!({"Keyword": "list"})))
            .await;

        assert!(result.structured_content.is_none());
        assert_eq!(text_of(&result), r#"["list"]"#);
    }

    #[tokio::test]
    async fn test_invoke_bad_arguments_is_tool_error() {
        let result = server().invoke("GetTopThemes", None).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Keyword"));
    }

    #[test]
    fn test_invoke_unknown_tool_is_tool_error() {
        let result = tokio_test::block_on(server().invoke("GetNothing", None));
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("GetNothing"));
    }
}
