//! PulseEngine MCP framework integration
//!
//! [`AutomationBackend`] plugs the tool dispatcher into the framework, which
//! owns the JSON-RPC framing, the MCP handshake and the stdio transport.

pub mod backend;

pub use backend::AutomationBackend;

use crate::error::{HaError, Result};
use pulseengine_mcp_auth::AuthConfig;
use pulseengine_mcp_server::backend::McpBackend;
use pulseengine_mcp_server::{McpServer, ServerConfig};
use pulseengine_mcp_transport::TransportConfig;
use tracing::info;

/// Framework configuration for a local stdio server
///
/// Stdio is only reachable by the parent process, so framework auth stays off.
pub fn stdio_server_config(backend: &AutomationBackend) -> ServerConfig {
    ServerConfig {
        server_info: backend.get_server_info(),
        auth_config: AuthConfig {
            enabled: false,
            ..Default::default()
        },
        transport_config: TransportConfig::Stdio,
        ..Default::default()
    }
}

/// Serve MCP on stdin/stdout until the client disconnects
pub async fn serve_stdio(backend: AutomationBackend) -> Result<()> {
    let config = stdio_server_config(&backend);

    let mut server = McpServer::new(backend, config)
        .await
        .map_err(|e| HaError::transport(e.to_string()))?;

    info!("Serving MCP over stdio");
    server
        .run()
        .await
        .map_err(|e| HaError::transport(e.to_string()))
}
