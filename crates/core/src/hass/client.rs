//! Home Assistant REST API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::HomeAssistantConfig;

use super::{EntityState, HassError, HomeAssistant, MediaTarget};

pub struct HassClient {
    client: Client,
    config: HomeAssistantConfig,
}

impl HassClient {
    pub fn new(config: HomeAssistantConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    async fn call_service(
        &self,
        domain: &str,
        service: &str,
        data: serde_json::Value,
    ) -> Result<(), HassError> {
        debug!(domain, service, "Calling Home Assistant service");

        let response = self
            .client
            .post(format!("{}/api/services/{}/{}", self.base(), domain, service))
            .bearer_auth(&self.config.token)
            .json(&data)
            .send()
            .await
            .map_err(|e| HassError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_default();
            return Err(HassError::Api { status, message });
        }

        Ok(())
    }
}

#[async_trait]
impl HomeAssistant for HassClient {
    async fn power_on_device(&self, device_id: &str) -> Result<(), HassError> {
        self.call_service("media_player", "turn_on", json!({ "device_id": device_id }))
            .await
    }

    async fn power_on_entity(&self, entity_id: &str) -> Result<(), HassError> {
        self.call_service("media_player", "turn_on", json!({ "entity_id": entity_id }))
            .await
    }

    async fn remote_power_on(&self, entity_id: &str) -> Result<(), HassError> {
        self.call_service("remote", "turn_on", json!({ "entity_id": entity_id }))
            .await
    }

    async fn select_source(&self, entity_id: &str, source: &str) -> Result<(), HassError> {
        self.call_service(
            "media_player",
            "select_source",
            json!({ "entity_id": entity_id, "source": source }),
        )
        .await
    }

    async fn press_button(&self, entity_id: &str) -> Result<(), HassError> {
        self.call_service("button", "press", json!({ "entity_id": entity_id }))
            .await
    }

    async fn entity_state(&self, entity_id: &str) -> Result<EntityState, HassError> {
        let response = self
            .client
            .get(format!("{}/api/states/{}", self.base(), entity_id))
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(|e| HassError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(HassError::UnknownEntity(entity_id.to_string()));
        }
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(HassError::Api { status, message });
        }

        response
            .json::<EntityState>()
            .await
            .map_err(|e| HassError::Json(e.to_string()))
    }

    async fn play_media(
        &self,
        target: &MediaTarget,
        content_id: &str,
        content_type: &str,
    ) -> Result<(), HassError> {
        let mut data = json!({
            "media_content_id": content_id,
            "media_content_type": content_type,
        });
        match target {
            MediaTarget::Device(id) => data["device_id"] = json!(id),
            MediaTarget::Entity(id) => data["entity_id"] = json!(id),
        }

        self.call_service("media_player", "play_media", data).await
    }
}
