//! Stateless streamable-HTTP transport
//!
//! rmcp's [`StreamableHttpService`] is mounted on `/mcp` in stateless mode:
//! every POST is served by a fresh handler over the shared registry and no
//! session is kept between requests. `/health` reports liveness.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::Result;
use crate::error::MCPError;
use crate::server::McpServer;

/// MCP service for `server`, bound to `shutdown`
pub fn mcp_service(
    server: McpServer,
    shutdown: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    let config = StreamableHttpServerConfig {
        stateful_mode: false,
        cancellation_token: shutdown,
        ..Default::default()
    };

    StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        config,
    )
}

/// Build the router serving MCP on `/mcp`
pub fn router(server: McpServer, shutdown: CancellationToken) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(server.clone())
        .nest_service("/mcp", mcp_service(server, shutdown))
}

/// Bind `address` and serve until ctrl-c
pub async fn serve(server: McpServer, address: &str) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| MCPError::BindFailed {
            address: address.to_string(),
            source,
        })?;

    serve_listener(server, listener).await
}

/// Serve on an already-bound listener until ctrl-c
pub async fn serve_listener(server: McpServer, listener: TcpListener) -> Result<()> {
    let local = listener.local_addr()?;
    info!("MCP server '{}' listening on http://{}/mcp", server.name(), local);

    let shutdown = CancellationToken::new();
    let app = router(server, shutdown.child_token());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|e| MCPError::TransportFailed(e.to_string()))
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}

async fn health(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": server.name(),
    }))
}
