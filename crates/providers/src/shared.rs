//! Process-wide backend handle.
//!
//! The LLM client is built at most once and then handed out read-only to
//! every request. A failed build is reported to the caller and not cached,
//! so nothing half-constructed is ever shared.

use std::sync::{Arc, OnceLock};

use docscout_config::AppConfig;
use docscout_core::error::ProviderError;
use docscout_core::provider::Provider;

type Factory = Box<dyn Fn() -> Result<Arc<dyn Provider>, ProviderError> + Send + Sync>;

pub struct SharedBackend {
    cell: OnceLock<Arc<dyn Provider>>,
    factory: Factory,
}

impl SharedBackend {
    /// Build lazily from configuration on first use.
    pub fn from_config(config: AppConfig) -> Self {
        Self::with_factory(move || crate::router::build_provider(&config))
    }

    /// Build lazily with a custom factory.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Provider>, ProviderError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            factory: Box::new(factory),
        }
    }

    /// Wrap an already-built provider.
    pub fn ready(provider: Arc<dyn Provider>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(provider.clone());
        Self {
            cell,
            factory: Box::new(move || Ok(provider.clone())),
        }
    }

    /// The shared provider, building it on first call.
    pub fn get(&self) -> Result<Arc<dyn Provider>, ProviderError> {
        if let Some(provider) = self.cell.get() {
            return Ok(provider.clone());
        }
        let built = (self.factory)()?;
        // A concurrent caller may have won the race; keep whichever landed first.
        Ok(self.cell.get_or_init(|| built).clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
