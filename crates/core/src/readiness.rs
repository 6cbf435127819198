//! Hardware readiness: power on a zone's display hardware, get the media app
//! in front, and poll until the zone's media client is discoverable.
//!
//! Everything here is best-effort. Hardware boot and client discovery are
//! asynchronous with variable latency, so the poll loop caps worst-case wait
//! (10 attempts, 3 seconds apart by default) and a timeout is a terminal
//! state, not an error: dispatch afterwards may still land on a client that
//! appears moments later.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{PowerMethod, ReadinessConfig, ZoneConfig};
use crate::hass::HomeAssistant;
use crate::metrics;

/// Terminal state of one readiness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessOutcome {
    Ready,
    TimedOut,
}

/// Run the readiness sequence for one zone.
///
/// PoweringOn -> AppSelecting -> Scanning -> Ready | TimedOut. Never fails:
/// action errors are logged and treated as no-ops.
pub async fn ensure_ready(
    hass: &dyn HomeAssistant,
    zone: &ZoneConfig,
    cfg: &ReadinessConfig,
) -> ReadinessOutcome {
    power_on(hass, zone).await;
    tokio::time::sleep(Duration::from_secs(zone.boot_delay_secs)).await;

    if needs_app_select(hass, zone, cfg).await {
        if let Some(hw_entity) = &zone.hardware_entity {
            if let Err(e) = hass.select_source(hw_entity, &cfg.app_name).await {
                warn!(entity = %hw_entity, "Source select failed: {}", e);
            }
            tokio::time::sleep(Duration::from_secs(zone.app_load_delay_secs)).await;
        }
    }

    let outcome = scan_for_client(hass, zone, cfg).await;
    let label = match outcome {
        ReadinessOutcome::Ready => "ready",
        ReadinessOutcome::TimedOut => "timed_out",
    };
    metrics::READINESS_OUTCOMES.with_label_values(&[label]).inc();
    outcome
}

async fn power_on(hass: &dyn HomeAssistant, zone: &ZoneConfig) {
    let result = match zone.power_method {
        PowerMethod::Device => match &zone.hardware_device_id {
            Some(device_id) => hass.power_on_device(device_id).await,
            None => Ok(()),
        },
        PowerMethod::Conditional => {
            // Power on only if the hardware looks off; an unreadable state
            // counts as off.
            let off = match &zone.hardware_entity {
                Some(entity) => hass
                    .entity_state(entity)
                    .await
                    .map(|s| s.is_unavailable())
                    .unwrap_or(true),
                None => true,
            };
            if off {
                match &zone.hardware_device_id {
                    Some(device_id) => hass.power_on_device(device_id).await,
                    None => Ok(()),
                }
            } else {
                Ok(())
            }
        }
        PowerMethod::Remote => match &zone.remote_entity {
            Some(entity) => hass.remote_power_on(entity).await,
            None => Ok(()),
        },
        PowerMethod::Generic => match &zone.hardware_entity {
            Some(entity) => hass.power_on_entity(entity).await,
            None => Ok(()),
        },
    };

    if let Err(e) = result {
        warn!(client = %zone.plex_client, "Power-on failed: {}", e);
    }
}

/// The `device` power method always reselects the source (that hardware
/// reports no usable source state). Otherwise select only when the reported
/// source differs from the media app; a failed state read means "selection
/// still needed".
async fn needs_app_select(
    hass: &dyn HomeAssistant,
    zone: &ZoneConfig,
    cfg: &ReadinessConfig,
) -> bool {
    if zone.power_method == PowerMethod::Device {
        return true;
    }
    let Some(hw_entity) = &zone.hardware_entity else {
        return false;
    };
    match hass.entity_state(hw_entity).await {
        Ok(state) => state.source() != Some(cfg.app_name.as_str()),
        Err(e) => {
            debug!(entity = %hw_entity, "State read failed, selecting source anyway: {}", e);
            true
        }
    }
}

async fn scan_for_client(
    hass: &dyn HomeAssistant,
    zone: &ZoneConfig,
    cfg: &ReadinessConfig,
) -> ReadinessOutcome {
    for attempt in 1..=cfg.poll_attempts {
        match hass.entity_state(&zone.plex_client).await {
            Ok(state) if !state.is_unavailable() => {
                debug!(
                    client = %zone.plex_client,
                    state = %state.state,
                    "Media client found"
                );
                return ReadinessOutcome::Ready;
            }
            Ok(_) | Err(_) => {}
        }

        debug!(
            client = %zone.plex_client,
            attempt,
            attempts = cfg.poll_attempts,
            "Media client not found, scanning"
        );
        if let Err(e) = hass.press_button(&cfg.scan_button).await {
            warn!("Scan button press failed: {}", e);
        }

        tokio::time::sleep(Duration::from_secs(cfg.poll_interval_secs)).await;
    }

    warn!(client = %zone.plex_client, "Media client never became available");
    ReadinessOutcome::TimedOut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHomeAssistant;

    fn zone(power_method: PowerMethod) -> ZoneConfig {
        ZoneConfig {
            plex_client: "media_player.plex_client".to_string(),
            plex_device_id: None,
            hardware_entity: Some("media_player.tv".to_string()),
            hardware_device_id: Some("hwdev".to_string()),
            remote_entity: Some("remote.tv".to_string()),
            power_method,
            boot_delay_secs: 0,
            app_load_delay_secs: 0,
        }
    }

    fn fast_cfg() -> ReadinessConfig {
        ReadinessConfig {
            scan_button: "button.plex_scan_clients".to_string(),
            app_name: "Plex".to_string(),
            poll_attempts: 10,
            poll_interval_secs: 0,
        }
    }

    #[tokio::test]
    async fn test_ready_on_first_poll_issues_zero_scans() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        let outcome = ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        assert_eq!(outcome, ReadinessOutcome::Ready);
        assert_eq!(hass.count_calls("press_button"), 0);
    }

    #[tokio::test]
    async fn test_timeout_after_exactly_ten_scans() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "unavailable");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        let outcome = ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        assert_eq!(outcome, ReadinessOutcome::TimedOut);
        assert_eq!(hass.count_calls("press_button"), 10);
    }

    #[tokio::test]
    async fn test_client_appearing_mid_scan_stops_the_loop() {
        let hass = MockHomeAssistant::new();
        // Unavailable for three polls, then idle.
        hass.queue_states(
            "media_player.plex_client",
            &["unavailable", "unavailable", "unavailable", "idle"],
        );
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        let outcome = ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        assert_eq!(outcome, ReadinessOutcome::Ready);
        assert_eq!(hass.count_calls("press_button"), 3);
    }

    #[tokio::test]
    async fn test_device_method_always_selects_source() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        // TV already on Plex, but the device method reselects regardless.
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        ensure_ready(&hass, &zone(PowerMethod::Device), &fast_cfg()).await;

        assert_eq!(hass.count_calls("power_on_device"), 1);
        assert_eq!(hass.count_calls("select_source"), 1);
    }

    #[tokio::test]
    async fn test_wrong_source_triggers_selection() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Netflix");

        ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        assert_eq!(hass.count_calls("select_source"), 1);
    }

    #[tokio::test]
    async fn test_matching_source_skips_selection() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        assert_eq!(hass.count_calls("select_source"), 0);
    }

    #[tokio::test]
    async fn test_conditional_skips_power_when_hardware_on() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        ensure_ready(&hass, &zone(PowerMethod::Conditional), &fast_cfg()).await;

        assert_eq!(hass.count_calls("power_on_device"), 0);
    }

    #[tokio::test]
    async fn test_conditional_powers_on_when_hardware_off() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        // First read (the power check) sees off; later reads see Plex active.
        hass.set_state_with_source("media_player.tv", "on", "Plex");
        hass.queue_states("media_player.tv", &["off"]);

        ensure_ready(&hass, &zone(PowerMethod::Conditional), &fast_cfg()).await;

        assert_eq!(hass.count_calls("power_on_device"), 1);
    }

    #[tokio::test]
    async fn test_remote_method_uses_remote_entity() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        ensure_ready(&hass, &zone(PowerMethod::Remote), &fast_cfg()).await;

        assert_eq!(hass.count_calls("remote_power_on"), 1);
        assert_eq!(hass.count_calls("power_on_device"), 0);
    }

    #[tokio::test]
    async fn test_action_failures_do_not_abort() {
        let hass = MockHomeAssistant::new();
        hass.fail_all_services(true);
        hass.set_state("media_player.plex_client", "idle");
        hass.set_state_with_source("media_player.tv", "on", "Plex");

        let outcome = ensure_ready(&hass, &zone(PowerMethod::Generic), &fast_cfg()).await;

        // Power-on failed, but the client is reachable: still Ready.
        assert_eq!(outcome, ReadinessOutcome::Ready);
    }
}
