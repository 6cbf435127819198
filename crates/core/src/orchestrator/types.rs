use serde::Serialize;
use thiserror::Error;

use crate::hass::HassError;
use crate::payload::PlaybackPayload;
use crate::readiness::ReadinessOutcome;
use crate::translator::TranslateError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("Playback dispatch failed: {0}")]
    Dispatch(#[from] HassError),
}

/// Result of one handled command, suitable for an API response.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub request_id: String,
    pub zone: String,
    pub media_type: String,
    /// `None` on the playlist path, where dispatch does not wait for the
    /// hardware sequence to finish.
    pub readiness: Option<ReadinessOutcome>,
    pub payload: PlaybackPayload,
}
