pub mod analyze;
pub mod config_cmd;
pub mod doctor;
pub mod serve;

use std::sync::Arc;

use docscout_agent::Orchestrator;
use docscout_config::AppConfig;
use docscout_providers::SharedBackend;

/// Load configuration and build the orchestrator every command shares.
///
/// The backend is not contacted here; it is built on first use.
pub(crate) fn load_orchestrator(
    model: Option<String>,
) -> Result<(AppConfig, Arc<SharedBackend>, Orchestrator), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(model) = model {
        config.override_model(model);
    }

    let backend = Arc::new(SharedBackend::from_config(config.clone()));
    let orchestrator = Orchestrator::from_config(&config, Arc::clone(&backend));
    Ok((config, backend, orchestrator))
}
