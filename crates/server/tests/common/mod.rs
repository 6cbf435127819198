//! In-process test fixture: the real router and state over mock
//! collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use showrunner_core::catalog::{CatalogCache, CatalogEntry, LibraryKind, LibrarySection};
use showrunner_core::config::{
    Config, HomeAssistantConfig, LlmProvider, PlexConfig, PowerMethod, ReadinessConfig,
    ServerConfig, TranslatorConfig, ZoneConfig,
};
use showrunner_core::testing::{MockCatalogSource, MockHomeAssistant, MockLlmClient};
use showrunner_core::translator::IntentTranslator;
use showrunner_core::CommandOrchestrator;

use showrunner_server::api::create_router;
use showrunner_server::state::AppState;

pub struct TestFixture {
    pub router: Router,
    pub hass: Arc<MockHomeAssistant>,
    pub llm: Arc<MockLlmClient>,
    pub source: Arc<MockCatalogSource>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub fn new() -> Self {
        let hass = Arc::new(MockHomeAssistant::new());
        hass.set_state("media_player.plex_living", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        let llm = Arc::new(MockLlmClient::new());

        let source = Arc::new(MockCatalogSource::new());
        source.set_sections(vec![LibrarySection {
            id: "1".to_string(),
            title: "Movies".to_string(),
            kind: LibraryKind::Movie,
        }]);
        source.set_items(
            LibraryKind::Movie,
            vec![CatalogEntry::new("Dune", "", Some(2021), "101")],
        );

        let config = test_config();
        let catalog = Arc::new(CatalogCache::new());
        let mut zone_names: Vec<String> = config.zones.keys().cloned().collect();
        zone_names.sort();
        let translator = IntentTranslator::new(
            Arc::clone(&llm) as Arc<dyn showrunner_core::translator::LlmClient>,
            &zone_names,
            &config.default_zone,
        );
        let orchestrator = CommandOrchestrator::new(
            config.zones.clone(),
            config.default_zone.clone(),
            config.readiness.clone(),
            Arc::clone(&catalog),
            Arc::clone(&source) as Arc<dyn showrunner_core::catalog::CatalogSource>,
            Arc::clone(&hass) as Arc<dyn showrunner_core::hass::HomeAssistant>,
            translator,
        );

        let state = Arc::new(AppState::new(
            config,
            orchestrator,
            catalog,
            Arc::clone(&source) as Arc<dyn showrunner_core::catalog::CatalogSource>,
        ));
        let router = create_router(state);

        Self {
            router,
            hass,
            llm,
            source,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
        TestResponse { status, body }
    }
}

fn test_config() -> Config {
    let mut zones = HashMap::new();
    zones.insert(
        "living_room".to_string(),
        ZoneConfig {
            plex_client: "media_player.plex_living".to_string(),
            plex_device_id: None,
            hardware_entity: Some("media_player.tv".to_string()),
            hardware_device_id: None,
            remote_entity: None,
            power_method: PowerMethod::Generic,
            boot_delay_secs: 0,
            app_load_delay_secs: 0,
        },
    );

    Config {
        server: ServerConfig::default(),
        home_assistant: HomeAssistantConfig {
            url: "http://ha.test:8123".to_string(),
            token: "secret-ha-token".to_string(),
            timeout_secs: 30,
        },
        plex: PlexConfig {
            url: "https://plex.test:32400".to_string(),
            token: "secret-plex-token".to_string(),
            verify_tls: false,
            timeout_secs: 30,
            refresh_interval_secs: 3600,
        },
        translator: TranslatorConfig {
            provider: LlmProvider::Ollama,
            model: "test-model".to_string(),
            api_key: None,
            api_base: None,
        },
        readiness: ReadinessConfig {
            scan_button: "button.plex_scan_clients".to_string(),
            app_name: "Plex".to_string(),
            poll_attempts: 2,
            poll_interval_secs: 0,
        },
        default_zone: "living_room".to_string(),
        zones,
    }
}
