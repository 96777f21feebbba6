//! `docscout serve` — Run the MCP server on stdio.

use std::sync::Arc;

use docscout_agent::GodocTool;
use docscout_core::tool::ToolRegistry;
use docscout_mcp::McpServer;
use tracing::info;

pub async fn run(model: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, backend, orchestrator) = super::load_orchestrator(model)?;

    // Refuse to start without a usable backend rather than failing every call.
    let provider = backend.get().map_err(|e| format!("Cannot start server: {e}"))?;
    info!(
        provider = provider.name(),
        model = %config.resolved_model(),
        policy = ?config.lookup.failure_policy,
        "Backend ready"
    );

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(GodocTool::new(Arc::new(orchestrator))));

    let server = Arc::new(McpServer::new(registry).with_server_info("docscout", env!("CARGO_PKG_VERSION")));
    server.run_stdio().await?;

    info!("Client disconnected, shutting down");
    Ok(())
}
