//! `docscout analyze` — One-shot analysis of a single file.

use std::path::PathBuf;

use docscout_agent::AnalysisRequest;
use docscout_core::FailurePolicy;

pub async fn run(
    file: PathBuf,
    root: Option<PathBuf>,
    model: Option<String>,
    policy: Option<FailurePolicy>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, _backend, mut orchestrator) = super::load_orchestrator(None)?;
    if let Some(policy) = policy {
        orchestrator = orchestrator.with_failure_policy(policy);
    }

    let mut request = AnalysisRequest::new(file);
    if let Some(root) = root {
        request = request.with_root(root);
    }
    if let Some(model) = model {
        request = request.with_model(model);
    }

    match orchestrator.analyze(&request).await {
        Ok(result) => {
            println!("{}", result.into_text());
            Ok(())
        }
        Err(e) => Err(format!("{} error: {e}", e.stage()).into()),
    }
}
