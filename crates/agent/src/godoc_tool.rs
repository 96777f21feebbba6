//! The `godoc` tool: analyze one Go file and return documentation for the
//! external symbols it uses.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use docscout_core::error::ToolError;
use docscout_core::tool::{Tool, ToolResult};
use serde::Deserialize;
use tracing::warn;

use crate::orchestrator::{AnalysisRequest, Orchestrator};

pub const TOOL_NAME: &str = "godoc";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GodocArgs {
    file_path: String,
    #[serde(default)]
    root_path: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl GodocArgs {
    fn into_request(self) -> AnalysisRequest {
        AnalysisRequest {
            file_path: PathBuf::from(self.file_path),
            root_path: self.root_path.filter(|p| !p.is_empty()).map(PathBuf::from),
            model: self.model.filter(|m| !m.is_empty()),
        }
    }
}

pub struct GodocTool {
    orchestrator: Arc<Orchestrator>,
}

impl GodocTool {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl Tool for GodocTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Analyze a Go source file, find the external packages and symbols it uses, \
         and return their `go doc` documentation."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the Go source file to analyze"
                },
                "rootPath": {
                    "type": "string",
                    "description": "Go module root; discovered from filePath when omitted"
                },
                "model": {
                    "type": "string",
                    "description": "Model used to propose lookups"
                }
            },
            "required": ["filePath"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: GodocArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(format!("expected {{\"filePath\": string}}: {e}")))?;
        if args.file_path.trim().is_empty() {
            return Err(ToolError::InvalidArguments("'filePath' must not be empty".into()));
        }

        match self.orchestrator.analyze(&args.into_request()).await {
            Ok(result) => Ok(ToolResult::text(result.into_text())),
            Err(e) => {
                warn!(stage = e.stage(), error = %e, "Analysis failed");
                Ok(ToolResult::error(format!("{} error: {e}", e.stage())))
            }
        }
    }
}
