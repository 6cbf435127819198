use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showrunner_core::catalog::{spawn_refresh_loop, CatalogCache, CatalogSource, PlexCatalogClient};
use showrunner_core::config::LlmProvider;
use showrunner_core::hass::{HassClient, HomeAssistant};
use showrunner_core::translator::{AnthropicClient, IntentTranslator, LlmClient, OllamaClient};
use showrunner_core::{load_config, validate_config, CommandOrchestrator};

use showrunner_server::api::create_router;
use showrunner_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("SHOWRUNNER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Zones: {:?} (default: {})",
        config.zones.keys().collect::<Vec<_>>(),
        config.default_zone
    );

    // Intent translator
    let llm: Arc<dyn LlmClient> = match config.translator.provider {
        LlmProvider::Anthropic => {
            let Some(api_key) = &config.translator.api_key else {
                bail!("Anthropic provider selected but no api_key configured");
            };
            let mut client = AnthropicClient::new(api_key, &config.translator.model);
            if let Some(api_base) = &config.translator.api_base {
                client = client.with_api_base(api_base);
            }
            Arc::new(client)
        }
        LlmProvider::Ollama => {
            let mut client = OllamaClient::new(&config.translator.model);
            if let Some(api_base) = &config.translator.api_base {
                client = client.with_api_base(api_base);
            }
            Arc::new(client)
        }
    };
    info!(
        "Intent translator: {} / {}",
        llm.provider(),
        llm.model()
    );
    let mut zone_names: Vec<String> = config.zones.keys().cloned().collect();
    zone_names.sort();
    let translator = IntentTranslator::new(llm, &zone_names, &config.default_zone);

    // Catalog client and cache, with the periodic refresh loop
    let source: Arc<dyn CatalogSource> = Arc::new(PlexCatalogClient::new(config.plex.clone()));
    let catalog = Arc::new(CatalogCache::new());
    let refresh_handle = spawn_refresh_loop(
        Arc::clone(&catalog),
        Arc::clone(&source),
        Duration::from_secs(config.plex.refresh_interval_secs),
    );
    info!(
        "Catalog refresh loop started (every {}s)",
        config.plex.refresh_interval_secs
    );

    // Home Assistant client
    let hass: Arc<dyn HomeAssistant> = Arc::new(HassClient::new(config.home_assistant.clone()));

    let orchestrator = CommandOrchestrator::new(
        config.zones.clone(),
        config.default_zone.clone(),
        config.readiness.clone(),
        Arc::clone(&catalog),
        Arc::clone(&source),
        hass,
        translator,
    );

    // Create app state and router
    let state = Arc::new(AppState::new(
        config.clone(),
        orchestrator,
        Arc::clone(&catalog),
        source,
    ));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    refresh_handle.abort();

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
