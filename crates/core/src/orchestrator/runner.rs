use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogCache, CatalogSource};
use crate::config::{ReadinessConfig, ZoneConfig};
use crate::hass::{HomeAssistant, MediaTarget};
use crate::metrics;
use crate::payload::{self, PlexMediaType};
use crate::readiness::{ensure_ready, ReadinessOutcome};
use crate::translator::IntentTranslator;

use super::types::{CommandError, CommandOutcome};

/// Drives one command from free text to a playback dispatch.
///
/// Hardware readiness runs concurrently with payload synthesis; every path
/// except playlists waits for it before dispatching. Playlists dispatch
/// immediately and leave the hardware sequence running on its own.
pub struct CommandOrchestrator {
    zones: HashMap<String, ZoneConfig>,
    default_zone: String,
    readiness: ReadinessConfig,
    catalog: Arc<CatalogCache>,
    source: Arc<dyn CatalogSource>,
    hass: Arc<dyn HomeAssistant>,
    translator: IntentTranslator,
}

impl CommandOrchestrator {
    pub fn new(
        zones: HashMap<String, ZoneConfig>,
        default_zone: String,
        readiness: ReadinessConfig,
        catalog: Arc<CatalogCache>,
        source: Arc<dyn CatalogSource>,
        hass: Arc<dyn HomeAssistant>,
        translator: IntentTranslator,
    ) -> Self {
        Self {
            zones,
            default_zone,
            readiness,
            catalog,
            source,
            hass,
            translator,
        }
    }

    pub async fn handle_command(&self, command: &str) -> Result<CommandOutcome, CommandError> {
        let request_id = Uuid::new_v4().to_string();
        info!(request_id = %request_id, command, "Handling command");

        // First command after startup may arrive before the refresh loop has
        // run; resolve against a populated catalog when possible.
        if self.catalog.is_empty() {
            self.catalog.refresh(self.source.as_ref()).await;
        }

        let intent = match self.translator.translate(command).await {
            Ok(intent) => intent,
            Err(e) => {
                metrics::COMMANDS_TOTAL
                    .with_label_values(&["translate_error"])
                    .inc();
                return Err(e.into());
            }
        };

        let (zone_name, zone) = self.resolve_zone(intent.control.room.as_deref());
        info!(
            request_id = %request_id,
            zone = %zone_name,
            kind = ?intent.query.kind(),
            "Intent translated"
        );

        let readiness_handle = {
            let hass = Arc::clone(&self.hass);
            let zone = zone.clone();
            let cfg = self.readiness.clone();
            tokio::spawn(async move { ensure_ready(hass.as_ref(), &zone, &cfg).await })
        };

        let (payload, media_type) = payload::synthesize(&intent, &self.catalog);

        // Playlists dispatch without waiting; the hardware sequence keeps
        // running in the background and playback starts once a client is up.
        let readiness = if media_type == PlexMediaType::Playlist {
            drop(readiness_handle);
            None
        } else {
            match readiness_handle.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    warn!(request_id = %request_id, "Readiness task panicked: {}", e);
                    Some(ReadinessOutcome::TimedOut)
                }
            }
        };

        let target = match &zone.plex_device_id {
            Some(device_id) => MediaTarget::Device(device_id.clone()),
            None => MediaTarget::Entity(zone.plex_client.clone()),
        };
        let content_id = payload.to_content_id();
        if let Err(e) = self
            .hass
            .play_media(&target, &content_id, media_type.as_str())
            .await
        {
            metrics::COMMANDS_TOTAL
                .with_label_values(&["dispatch_error"])
                .inc();
            return Err(e.into());
        }

        metrics::COMMANDS_TOTAL.with_label_values(&["ok"]).inc();
        info!(
            request_id = %request_id,
            zone = %zone_name,
            media_type = media_type.as_str(),
            readiness = ?readiness,
            "Playback dispatched"
        );

        Ok(CommandOutcome {
            request_id,
            zone: zone_name,
            media_type: media_type.as_str().to_string(),
            readiness,
            payload,
        })
    }

    /// Requested zone if configured, otherwise the default. An unknown name
    /// is the translator mishearing a room, not a hard error.
    fn resolve_zone(&self, requested: Option<&str>) -> (String, &ZoneConfig) {
        if let Some(name) = requested {
            if let Some(zone) = self.zones.get(name) {
                return (name.to_string(), zone);
            }
            warn!(zone = %name, "Unknown zone requested, using default");
        }
        let zone = self
            .zones
            .get(&self.default_zone)
            .expect("default zone validated at startup");
        (self.default_zone.clone(), zone)
    }
}
