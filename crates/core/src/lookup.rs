//! Lookup domain types: the commands the backend proposes, what running
//! them produced, and the final report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::LookupError;

/// Text returned when a request turns up no documentation at all.
pub const NOTHING_FOUND: &str = "No documentation found for the external symbols used by this file.";

/// A single documentation lookup, e.g. `go doc -C /src/app github.com/google/uuid.New`.
///
/// Commands are assembled from typed fields instead of edited as strings,
/// so scoping can never land inside a symbol path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupCommand {
    /// Executable name (`go`)
    pub tool: String,

    /// Subcommand (`doc`)
    pub verb: String,

    /// Directory the tool should resolve packages from (`-C <dir>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<PathBuf>,

    /// Symbol path and any flags, in the order the backend wrote them
    pub args: Vec<String>,
}

impl LookupCommand {
    pub fn new(tool: impl Into<String>, verb: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            verb: verb.into(),
            scope: None,
            args,
        }
    }

    /// The same command, scoped to `root`.
    pub fn scoped(mut self, root: impl Into<PathBuf>) -> Self {
        self.scope = Some(root.into());
        self
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }

    /// Arguments passed to the executable, in order.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(self.verb.clone());
        if let Some(scope) = &self.scope {
            argv.push("-C".into());
            argv.push(scope.display().to_string());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for LookupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in self.argv() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What happened when a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStatus {
    Success(String),
    Failure(LookupError),
}

/// One command and its result. Created once per command by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// The command as executed (after scoping)
    pub command: LookupCommand,
    pub status: LookupStatus,
}

impl LookupOutcome {
    pub fn success(command: LookupCommand, text: impl Into<String>) -> Self {
        Self {
            command,
            status: LookupStatus::Success(text.into()),
        }
    }

    pub fn failure(command: LookupCommand, error: LookupError) -> Self {
        Self {
            command,
            status: LookupStatus::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, LookupStatus::Success(_))
    }
}

/// How failed lookups are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep failures in the report, with the error under the command header.
    #[default]
    Annotate,
    /// Leave failures out of the report entirely.
    Drop,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annotate" => Ok(Self::Annotate),
            "drop" => Ok(Self::Drop),
            other => Err(format!("unknown failure policy '{other}' (expected 'annotate' or 'drop')")),
        }
    }
}

/// The final report for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    /// At least one lookup succeeded.
    Documentation(String),

    /// Nothing succeeded. Under [`FailurePolicy::Annotate`] the failed
    /// lookups are carried along so the caller can see what was tried.
    NothingFound { failures: Option<String> },
}

impl AnalysisResult {
    pub fn nothing_found() -> Self {
        Self::NothingFound { failures: None }
    }

    pub fn is_nothing_found(&self) -> bool {
        matches!(self, Self::NothingFound { .. })
    }

    /// The text handed back to the caller.
    pub fn into_text(self) -> String {
        match self {
            Self::Documentation(text) => text,
            Self::NothingFound { failures: None } => NOTHING_FOUND.to_string(),
            Self::NothingFound {
                failures: Some(failures),
            } => format!("{NOTHING_FOUND}\n\n{failures}"),
        }
    }
}
