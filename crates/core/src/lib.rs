//! # docscout core
//!
//! Domain types, traits, and error definitions for docscout, the
//! documentation scout that turns a Go source file into a bundle of
//! `go doc` output for the external symbols it uses.
//!
//! Every seam is a trait here: the LLM backend ([`Provider`]) and the
//! callable tool surface ([`Tool`]). Implementations live in their
//! respective crates, so pipelines can be tested against scripted stubs.

pub mod error;
pub mod lookup;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{LookupError, ProviderError, ToolError};
pub use lookup::{AnalysisResult, FailurePolicy, LookupCommand, LookupOutcome, LookupStatus};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
