use std::sync::Arc;

use showrunner_core::catalog::{CatalogCache, CatalogSource, CatalogStatus};
use showrunner_core::{CommandOrchestrator, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: CommandOrchestrator,
    catalog: Arc<CatalogCache>,
    source: Arc<dyn CatalogSource>,
}

impl AppState {
    pub fn new(
        config: Config,
        orchestrator: CommandOrchestrator,
        catalog: Arc<CatalogCache>,
        source: Arc<dyn CatalogSource>,
    ) -> Self {
        Self {
            config,
            orchestrator,
            catalog,
            source,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> &CommandOrchestrator {
        &self.orchestrator
    }

    pub fn catalog_status(&self) -> Vec<CatalogStatus> {
        self.catalog.status()
    }

    pub async fn refresh_catalog(&self) -> Vec<CatalogStatus> {
        self.catalog.refresh(self.source.as_ref()).await;
        self.catalog.status()
    }
}
