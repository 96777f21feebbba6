//! Shared test doubles for orchestrator and tool tests.

use async_trait::async_trait;
use docscout_core::error::ProviderError;
use docscout_core::message::Message;
use docscout_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use docscout_core::{LookupCommand, LookupError};
use docscout_tools::executor::CommandExecutor;
use std::sync::Mutex;

/// A provider that answers every request with the same scripted result
/// and remembers what it was asked.
pub struct ScriptedProvider {
    reply: Result<String, ProviderError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn text(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let text = self.reply.clone()?;
        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        })
    }
}

/// Records the literal command lines it was asked to run. Symbols
/// containing "Missing" fail the way `go doc` does for unknown symbols.
#[derive(Default)]
pub struct RecordingExecutor {
    seen: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub fn commands(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &LookupCommand) -> Result<String, LookupError> {
        self.seen.lock().unwrap().push(command.to_string());
        let symbol = command.args.join(" ");
        if symbol.contains("Missing") {
            Err(LookupError::Exit {
                code: Some(1),
                stderr: format!("doc: no symbol {symbol}"),
            })
        } else {
            Ok(format!("documentation for {symbol}"))
        }
    }
}
