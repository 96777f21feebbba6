//! Subprocess execution for lookup commands.
//!
//! The executor is the only place that touches processes. Tests swap in a
//! recording stub through the [`CommandExecutor`] trait.

use async_trait::async_trait;
use docscout_core::{LookupCommand, LookupError};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default upper bound for a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs one lookup and returns its standard output.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &LookupCommand) -> Result<String, LookupError>;
}

/// Runs lookups as child processes, without a shell.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, command: &LookupCommand) -> Result<String, LookupError> {
        debug!(command = %command, "Running lookup");

        let child = Command::new(&command.tool)
            .args(command.argv())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(LookupError::Spawn {
                    tool: command.tool.clone(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(command = %command, timeout = ?self.timeout, "Lookup timed out");
                return Err(LookupError::Timeout { timeout: self.timeout });
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %command, exit_code = ?output.status.code(), "Lookup failed");
            Err(LookupError::Exit {
                code: output.status.code(),
                stderr,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> LookupCommand {
        // `sh -c <script>`: verb is "-c", so argv is ["-c", script]
        LookupCommand::new("sh", "-c", vec![script.to_string()])
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let out = ProcessExecutor::default()
            .execute(&sh("echo 'func New() UUID'"))
            .await
            .unwrap();
        assert_eq!(out, "func New() UUID");
    }

    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let err = ProcessExecutor::default()
            .execute(&sh("echo 'no symbol Frob' >&2; exit 1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LookupError::Exit {
                code: Some(1),
                stderr: "no symbol Frob".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_executable_is_a_spawn_error() {
        let cmd = LookupCommand::new("docscout-no-such-binary", "doc", vec!["x.Y".into()]);
        let err = ProcessExecutor::default().execute(&cmd).await.unwrap_err();
        assert!(matches!(err, LookupError::Spawn { .. }));
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let executor = ProcessExecutor::new(Duration::from_millis(100));
        let err = executor.execute(&sh("sleep 5")).await.unwrap_err();
        assert_eq!(
            err,
            LookupError::Timeout {
                timeout: Duration::from_millis(100)
            }
        );
        assert_eq!(err.to_string(), "timed out after 100ms");
    }
}
