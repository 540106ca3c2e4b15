//! Stdio transport
//!
//! One JSON-RPC message per line on stdin, one per line on stdout. rmcp
//! handles each request on its own task, so a slow upstream call does not
//! hold up `ping` or later requests. EOF on stdin ends the session.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::Result;
use crate::error::MCPError;
use crate::server::McpServer;

type Reader = Box<dyn AsyncRead + Send + Unpin>;
type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Serve on the process's stdin/stdout
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    let (stdin, stdout) = rmcp::transport::io::stdio();
    serve(server, stdin, stdout).await
}

/// Serve line-delimited JSON-RPC from `reader`, writing responses to `writer`
pub async fn serve(
    server: McpServer,
    reader: impl AsyncRead + Send + Unpin + 'static,
    writer: impl AsyncWrite + Send + Unpin + 'static,
) -> Result<()> {
    let transport: (Reader, Writer) = (Box::new(reader), Box::new(writer));

    let service = rmcp::serve_server(server, transport)
        .await
        .map_err(|e| MCPError::TransportFailed(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| MCPError::TransportFailed(e.to_string()))?;

    info!("Stdio session ended: {:?}", reason);
    Ok(())
}
