//! Home-automation host action layer.
//!
//! The narrow capability set the orchestrator consumes: power things on,
//! select a source, press a button, read one entity's state, play media.
//! Every call is fire-and-forget or a single value read; nothing streams.

mod client;
mod types;

pub use client::HassClient;
pub use types::{EntityState, MediaTarget};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HassError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("JSON error: {0}")]
    Json(String),
}

#[async_trait]
pub trait HomeAssistant: Send + Sync {
    /// media_player.turn_on addressed by device id.
    async fn power_on_device(&self, device_id: &str) -> Result<(), HassError>;

    /// media_player.turn_on addressed by entity id.
    async fn power_on_entity(&self, entity_id: &str) -> Result<(), HassError>;

    /// remote.turn_on for hardware driven through a remote entity.
    async fn remote_power_on(&self, entity_id: &str) -> Result<(), HassError>;

    /// media_player.select_source on the display hardware.
    async fn select_source(&self, entity_id: &str, source: &str) -> Result<(), HassError>;

    /// button.press (used for the media backend's client scan button).
    async fn press_button(&self, entity_id: &str) -> Result<(), HassError>;

    /// Read one entity's reported state.
    async fn entity_state(&self, entity_id: &str) -> Result<EntityState, HassError>;

    /// media_player.play_media with a content id payload and content type tag.
    async fn play_media(
        &self,
        target: &MediaTarget,
        content_id: &str,
        content_type: &str,
    ) -> Result<(), HassError>;
}
