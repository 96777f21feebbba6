//! Line-delimited JSON-RPC over stdio.
//!
//! Each request is handled on its own task so a slow `tools/call` does not
//! hold up the next one. Responses are written by a single writer as they
//! complete, one JSON object per line.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use docscout_core::tool::{ToolCall, ToolRegistry};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::McpError;
use crate::protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, McpTool, PARSE_ERROR, PROTOCOL_VERSION,
};

pub struct McpServer {
    registry: ToolRegistry,
    name: String,
    version: String,
    initialized: AtomicBool,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            name: "docscout".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Whether the client has sent `notifications/initialized`.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run_stdio(self: Arc<Self>) -> Result<(), McpError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Returns once the reader hits EOF and every in-flight request has
    /// been answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(32);
        info!(server = %self.name, tools = self.registry.len(), "MCP server listening on stdio");

        let read_loop = async move {
            let mut lines = BufReader::new(reader).lines();
            while let Some(line) = lines.next_line().await? {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                let server = Arc::clone(&self);
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_message(&line).await {
                        let _ = tx.send(response).await;
                    }
                });
            }
            debug!("stdin closed");
            Ok::<(), McpError>(())
        };

        let write_loop = async move {
            while let Some(response) = rx.recv().await {
                let mut json = serde_json::to_string(&response)?;
                json.push('\n');
                writer.write_all(json.as_bytes()).await?;
                writer.flush().await?;
            }
            Ok::<(), McpError>(())
        };

        tokio::try_join!(read_loop, write_loop)?;
        Ok(())
    }

    /// Handle one raw line. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {e}")));
            }
        };

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        debug!(method = %request.method, "Handling request");
        Some(match self.handle_request(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => {
                self.initialized.store(true, Ordering::Relaxed);
                info!("MCP client initialized");
            }
            other => debug!(method = other, "Ignoring notification"),
        }
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, (i32, String)> {
        match method {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => {
                let tools: Vec<McpTool> = self.registry.definitions().into_iter().map(McpTool::from).collect();
                Ok(json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(params).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {other}"))),
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.name,
                "version": self.version
            }
        })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i32, String)> {
        let params: CallToolParams =
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, format!("Invalid params: {e}")))?;

        let call = ToolCall {
            name: params.name,
            arguments: params.arguments.unwrap_or_else(|| json!({})),
        };

        match self.registry.execute(&call).await {
            Ok(result) => {
                if result.is_error {
                    warn!(tool = %call.name, "Tool reported an error");
                }
                serde_json::to_value(CallToolResult::from(result)).map_err(|e| (INTERNAL_ERROR, e.to_string()))
            }
            // Unknown tool or arguments the tool could not interpret.
            Err(e) => Err((INVALID_PARAMS, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docscout_core::error::ToolError;
    use docscout_core::tool::{Tool, ToolResult};

    /// Echoes `text`; fails the work when `text` is "boom".
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        async fn execute(&self, arguments: Value) -> Result<ToolResult, ToolError> {
            let text = arguments["text"]
                .as_str()
                .ok_or_else(|| ToolError::InvalidArguments("Missing 'text' argument".into()))?;
            if text == "boom" {
                Ok(ToolResult::error("input error: boom"))
            } else {
                Ok(ToolResult::text(text))
            }
        }
    }

    fn server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        McpServer::new(registry).with_server_info("docscout-test", "9.9.9")
    }

    async fn call(server: &McpServer, message: Value) -> JsonRpcResponse {
        server.handle_message(&message.to_string()).await.unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_server() {
        let resp = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "docscout-test");
        assert_eq!(result["serverInfo"]["version"], "9.9.9");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn initialized_notification_gets_no_response() {
        let server = server();
        assert!(!server.is_initialized());
        let resp = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(resp.is_none());
        assert!(server.is_initialized());
    }

    #[tokio::test]
    async fn tools_list_uses_camel_case_schema_key() {
        let resp = call(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let tools = &resp.result.unwrap()["tools"];
        assert_eq!(tools[0]["name"], "echo");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["text"]));
    }

    #[tokio::test]
    async fn tools_call_returns_text_content() {
        let resp = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"text": "hello"}}}),
        )
        .await;
        assert_eq!(resp.id, json!("a"));
        let result = resp.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "hello");
        assert_eq!(result["isError"], false);
    }

    #[tokio::test]
    async fn tool_failure_is_flagged_in_result() {
        let resp = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"text": "boom"}}}),
        )
        .await;
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "input error: boom");
    }

    #[tokio::test]
    async fn bad_arguments_and_unknown_tools_are_invalid_params() {
        let server = server();
        let missing = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {}}}),
        )
        .await;
        assert_eq!(missing.error.unwrap().code, INVALID_PARAMS);

        let unknown = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"name": "nope"}}),
        )
        .await;
        assert_eq!(unknown.error.unwrap().code, INVALID_PARAMS);

        let no_name = call(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {}})).await;
        assert_eq!(no_name.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method_and_garbage() {
        let server = server();
        let resp = call(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"})).await;
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);

        let resp = server.handle_message("{not json").await.unwrap();
        assert_eq!(resp.id, Value::Null);
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);

        let resp = call(&server, json!({"jsonrpc": "1.0", "id": 9, "method": "ping"})).await;
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn ping_answers_empty_object() {
        let resp = call(&server(), json!({"jsonrpc": "2.0", "id": 10, "method": "ping"})).await;
        assert_eq!(resp.result, Some(json!({})));
    }

    #[tokio::test]
    async fn serve_answers_every_request_until_eof() {
        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            String::new(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"text": "hi"}}})
            .to_string(),
        ]
        .join("\n");

        let mut output: Vec<u8> = Vec::new();
        Arc::new(server()).serve(input.as_bytes(), &mut output).await.unwrap();

        let mut responses: Vec<JsonRpcResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        responses.sort_by_key(|r| r.id.as_i64());

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, json!(1));
        assert_eq!(responses[1].result.as_ref().unwrap()["content"][0]["text"], "hi");
    }
}
