//! Configuration loading, validation, and management for docscout.
//!
//! Loads configuration from `~/.docscout/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use docscout_core::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-neutral credential variable, consulted before any provider's own.
pub const GENERIC_API_KEY_VAR: &str = "DOCSCOUT_API_KEY";

/// Environment variables consulted for `provider`'s credential, in priority
/// order: the generic one, then the provider's own (`ANTHROPIC_API_KEY`).
pub fn credential_vars(provider: &str) -> Vec<String> {
    let own = format!(
        "{}_API_KEY",
        provider.to_ascii_uppercase().replace(['.', '-'], "_")
    );
    vec![GENERIC_API_KEY_VAR.to_string(), own]
}

/// The root configuration structure.
///
/// Maps directly to `~/.docscout/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Documentation lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    1024
}

const REDACTED: &str = "[REDACTED]";

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => REDACTED,
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("lookup", &self.lookup)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

/// How documentation lookups are run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Documentation executable
    #[serde(default = "default_tool")]
    pub tool: String,

    /// File that marks a module root
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Upper bound on a single lookup, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether failed lookups are annotated in the report or dropped
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_tool() -> String {
    "go".into()
}
fn default_marker() -> String {
    "go.mod".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            marker: default_marker(),
            timeout_secs: default_timeout_secs(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.docscout/config.toml).
    ///
    /// Also checks environment variables, see [`AppConfig::apply_env_overrides`].
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides.
    ///
    /// - `DOCSCOUT_PROVIDER` first, so the credential lookup targets it
    /// - credential: `DOCSCOUT_API_KEY`, then the provider's own variable
    ///   (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, ...), only when the file has none
    /// - `DOCSCOUT_MODEL`
    pub fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = env("DOCSCOUT_PROVIDER").filter(|v| !v.trim().is_empty()) {
            self.default_provider = provider;
        }

        if self.resolved_api_key().is_none() {
            self.api_key = credential_vars(&self.default_provider)
                .iter()
                .find_map(|name| env(name).filter(|v| !v.trim().is_empty()));
        }

        if let Some(model) = env("DOCSCOUT_MODEL").filter(|v| !v.trim().is_empty()) {
            self.override_model(model);
        }
    }

    /// Force `model` for the active provider, over both the top-level default
    /// and the provider section's own default.
    pub fn override_model(&mut self, model: impl Into<String>) {
        let model = model.into();
        if let Some(section) = self.providers.get_mut(&self.default_provider) {
            if section.default_model.is_some() {
                section.default_model = Some(model.clone());
            }
        }
        self.default_model = model;
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docscout")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "lookup.timeout_secs must be > 0".into(),
            ));
        }

        if self.lookup.tool.trim().is_empty() || self.lookup.marker.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "lookup.tool and lookup.marker must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The credential for the default provider, from its own section or the
    /// top-level key.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.providers
            .get(&self.default_provider)
            .and_then(|p| p.api_key.clone())
            .or_else(|| self.api_key.clone())
    }

    /// The model for the default provider: its section's `default_model`,
    /// else the top-level one.
    pub fn resolved_model(&self) -> String {
        self.providers
            .get(&self.default_provider)
            .and_then(|p| p.default_model.clone())
            .unwrap_or_else(|| self.default_model.clone())
    }

    /// The effective configuration as TOML, with every credential masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        if shown.api_key.is_some() {
            shown.api_key = Some(REDACTED.into());
        }
        for section in shown.providers.values_mut() {
            if section.api_key.is_some() {
                section.api_key = Some(REDACTED.into());
            }
        }
        toml::to_string_pretty(&shown).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Generate a default config TOML string (for the `config` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            lookup: LookupConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
