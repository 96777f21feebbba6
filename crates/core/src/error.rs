//! Error types for the docscout domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use std::time::Duration;
use thiserror::Error;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failure of a single documentation lookup.
///
/// These never abort a batch: the runner records them against the
/// command that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("failed to start `{tool}`: {reason}")]
    Spawn { tool: String, reason: String },

    #[error("exited with {}: {stderr}", exit_label(.code))]
    Exit { code: Option<i32>, stderr: String },

    #[error("timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".into(),
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn lookup_exit_error_includes_status_and_stderr() {
        let err = LookupError::Exit {
            code: Some(1),
            stderr: "doc: no symbol Frobnicate in package example.com/widgets".into(),
        };
        let text = err.to_string();
        assert!(text.contains("status 1"));
        assert!(text.contains("Frobnicate"));
    }

    #[test]
    fn lookup_exit_error_without_code_mentions_signal() {
        let err = LookupError::Exit {
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn lookup_timeout_keeps_sub_second_precision() {
        let err = LookupError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "timed out after 250ms");

        let err = LookupError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "timed out after 30s");
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::InvalidArguments("missing filePath".into());
        assert!(err.to_string().contains("filePath"));
    }
}
