//! Request orchestration for docscout.
//!
//! One request runs one pass through the pipeline:
//!
//! 1. **Backend**: obtain the shared LLM client (fails fast without a credential)
//! 2. **Locate + read**: find the module root and read the file, concurrently
//! 3. **Propose**: send the prompt and collect the backend's answer
//! 4. **Extract**: keep well-formed `go doc` lines
//! 5. **Run**: execute every lookup concurrently, scoped to the root
//! 6. **Aggregate**: join outcomes into a single report
//!
//! [`GodocTool`] wraps the pipeline as a callable tool and is the last
//! point where errors become error-flagged results.

pub mod godoc_tool;
pub mod orchestrator;

#[cfg(test)]
mod test_helpers;

pub use godoc_tool::GodocTool;
pub use orchestrator::{AnalysisError, AnalysisRequest, Orchestrator};
