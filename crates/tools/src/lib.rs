//! Pipeline stages for docscout.
//!
//! Each stage is small and independently testable:
//! - [`root`]: find the enclosing `go.mod`
//! - [`prompt`]: ask the backend for lookup commands
//! - [`extract`]: keep only well-formed `go doc` lines
//! - [`executor`] / [`runner`]: run the lookups concurrently
//! - [`aggregate`]: join the outcomes into one report

pub mod aggregate;
pub mod executor;
pub mod extract;
pub mod prompt;
pub mod root;
pub mod runner;

pub use aggregate::aggregate;
pub use executor::{CommandExecutor, ProcessExecutor};
pub use extract::CommandExtractor;
pub use prompt::build_prompt;
pub use root::RootLocator;
pub use runner::CommandRunner;
