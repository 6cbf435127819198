//! Core library for showrunner: natural-language media playback
//! orchestration against a Plex catalog and Home Assistant hardware.
//!
//! The pipeline is translate (free text to structured intent), prepare
//! (hardware readiness per zone), synthesize (intent plus catalog snapshot
//! to a playback payload) and dispatch (one play command to the zone's
//! media client).

pub mod catalog;
pub mod config;
pub mod hass;
pub mod intent;
pub mod metrics;
pub mod orchestrator;
pub mod payload;
pub mod readiness;
pub mod resolver;
pub mod testing;
pub mod translator;

pub use config::{load_config, validate_config, Config, ConfigError, SanitizedConfig};
pub use orchestrator::{CommandError, CommandOrchestrator, CommandOutcome};
