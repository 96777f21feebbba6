//! # docscout MCP
//!
//! Exposes a [`ToolRegistry`](docscout_core::tool::ToolRegistry) to MCP
//! clients over stdio: `initialize`, `ping`, `tools/list` and `tools/call`.

pub mod protocol;
pub mod server;

pub use server::McpServer;

#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}
