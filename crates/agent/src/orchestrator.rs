//! The analysis pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use docscout_config::AppConfig;
use docscout_core::error::ProviderError;
use docscout_core::provider::ProviderRequest;
use docscout_core::{AnalysisResult, FailurePolicy};
use docscout_providers::SharedBackend;
use docscout_tools::executor::CommandExecutor;
use docscout_tools::{CommandExtractor, CommandRunner, ProcessExecutor, RootLocator, aggregate, build_prompt};
use tracing::{debug, info};

/// One analysis request. Built per call and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Source file to analyze
    pub file_path: PathBuf,

    /// Explicit module root; discovered from `file_path` when absent
    pub root_path: Option<PathBuf>,

    /// Backend model; the configured default when absent
    pub model: Option<String>,
}

impl AnalysisRequest {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            root_path: None,
            model: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A failure that aborts the request.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("backend is not configured: {0}")]
    Configuration(ProviderError),

    #[error("cannot read {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    #[error("backend request failed: {0}")]
    Backend(ProviderError),
}

impl AnalysisError {
    /// The pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Input { .. } => "input",
            Self::Backend(_) => "backend",
        }
    }
}

/// Runs requests through locate → read → propose → extract → run → aggregate.
pub struct Orchestrator {
    backend: Arc<SharedBackend>,
    locator: RootLocator,
    extractor: CommandExtractor,
    runner: CommandRunner,
    policy: FailurePolicy,
    default_model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Orchestrator {
    /// Create an orchestrator with Go defaults.
    pub fn new(backend: Arc<SharedBackend>, executor: Arc<dyn CommandExecutor>) -> Self {
        let defaults = AppConfig::default();
        Self {
            backend,
            locator: RootLocator::new(defaults.lookup.marker),
            extractor: CommandExtractor::new(defaults.lookup.tool),
            runner: CommandRunner::new(executor),
            policy: defaults.lookup.failure_policy,
            default_model: defaults.default_model,
            temperature: defaults.default_temperature,
            max_tokens: Some(defaults.default_max_tokens),
        }
    }

    /// Create an orchestrator that runs real `go doc` processes as configured.
    pub fn from_config(config: &AppConfig, backend: Arc<SharedBackend>) -> Self {
        let executor = ProcessExecutor::new(Duration::from_secs(config.lookup.timeout_secs));
        Self {
            backend,
            locator: RootLocator::new(&config.lookup.marker),
            extractor: CommandExtractor::new(&config.lookup.tool),
            runner: CommandRunner::new(Arc::new(executor)),
            policy: config.lookup.failure_policy,
            default_model: config.resolved_model(),
            temperature: config.default_temperature,
            max_tokens: Some(config.default_max_tokens),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.locator = RootLocator::new(marker);
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Run one request to completion.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let provider = self.backend.get().map_err(AnalysisError::Configuration)?;

        let (root, contents) = tokio::join!(
            async {
                match &request.root_path {
                    Some(root) => Some(root.clone()),
                    None => self.locator.locate(&request.file_path),
                }
            },
            tokio::fs::read_to_string(&request.file_path),
        );

        let contents = contents.map_err(|e| AnalysisError::Input {
            path: request.file_path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(root) = &request.root_path {
            if !root.is_dir() {
                return Err(AnalysisError::Input {
                    path: root.clone(),
                    reason: "root path is not a directory".into(),
                });
            }
        }

        match &root {
            Some(root) => debug!(root = %root.display(), "Using module root"),
            None => debug!(file = %request.file_path.display(), "No module root found, running unscoped"),
        }

        let model = request.model.clone().unwrap_or_else(|| self.default_model.clone());
        let mut provider_request =
            ProviderRequest::single_prompt(&model, build_prompt(&contents)).with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            provider_request = provider_request.with_max_tokens(max_tokens);
        }

        debug!(provider = provider.name(), model = %model, "Requesting lookup commands");
        let response = provider
            .complete(provider_request)
            .await
            .map_err(AnalysisError::Backend)?;

        if response.message.content.trim().is_empty() {
            return Err(AnalysisError::Backend(ProviderError::EmptyCompletion));
        }

        let commands = self.extractor.extract(&response.message.content);
        if commands.is_empty() {
            info!(file = %request.file_path.display(), "No commands generated");
            return Ok(AnalysisResult::nothing_found());
        }
        info!(count = commands.len(), "Extracted lookup commands");

        let outcomes = self.runner.run(commands, root.as_deref()).await;
        Ok(aggregate(&outcomes, self.policy))
    }
}
