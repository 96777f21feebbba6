//! Concurrent execution of lookup commands.

use std::path::Path;
use std::sync::Arc;

use docscout_core::{LookupCommand, LookupOutcome};
use futures::future::join_all;
use tracing::{debug, info};

use crate::executor::CommandExecutor;

/// Scopes commands to the module root and runs them all at once.
#[derive(Clone)]
pub struct CommandRunner {
    executor: Arc<dyn CommandExecutor>,
}

impl CommandRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Run every command and return one outcome per command, in input order.
    ///
    /// Commands are scoped to `root` when one was found. Executions are
    /// independent: a failure is recorded on its own outcome and does not
    /// stop the others. Returns only after every execution has settled.
    pub async fn run(&self, commands: Vec<LookupCommand>, root: Option<&Path>) -> Vec<LookupOutcome> {
        let scoped: Vec<LookupCommand> = commands
            .into_iter()
            .map(|command| match root {
                Some(root) => command.scoped(root),
                None => command,
            })
            .collect();

        debug!(count = scoped.len(), scoped = root.is_some(), "Dispatching lookups");

        let futures = scoped.into_iter().map(|command| {
            let executor = self.executor.clone();
            async move {
                match executor.execute(&command).await {
                    Ok(text) => LookupOutcome::success(command, text),
                    Err(e) => LookupOutcome::failure(command, e),
                }
            }
        });
        let outcomes = join_all(futures).await;

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "Lookups finished"
        );
        outcomes
    }
}
