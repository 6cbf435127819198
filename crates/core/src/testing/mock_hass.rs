//! Mock Home Assistant for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use crate::hass::{EntityState, HassError, HomeAssistant, MediaTarget};

/// A recorded action for test assertions, in call order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Trait method name ("power_on_device", "play_media", ...).
    pub method: String,
    pub args: Vec<String>,
}

/// A recorded play_media dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayMediaCall {
    pub target: MediaTarget,
    pub content_id: String,
    pub content_type: String,
}

/// Mock implementation of the [`HomeAssistant`] trait.
///
/// - Scriptable entity states: a per-entity queue consumed one read at a
///   time, falling back to a default state once drained.
/// - Records every action for ordering/count assertions.
/// - Can fail all service calls (state reads keep working).
#[derive(Debug, Default)]
pub struct MockHomeAssistant {
    calls: Mutex<Vec<RecordedCall>>,
    plays: Mutex<Vec<PlayMediaCall>>,
    states: RwLock<HashMap<String, EntityState>>,
    state_queues: Mutex<HashMap<String, VecDeque<EntityState>>>,
    fail_services: AtomicBool,
}

impl MockHomeAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entity's default reported state.
    pub fn set_state(&self, entity_id: &str, state: &str) {
        self.states
            .write()
            .unwrap()
            .insert(entity_id.to_string(), EntityState::new(state));
    }

    /// Set an entity's default state with an active source attribute.
    pub fn set_state_with_source(&self, entity_id: &str, state: &str, source: &str) {
        self.states.write().unwrap().insert(
            entity_id.to_string(),
            EntityState::new(state).with_attribute("source", source),
        );
    }

    /// Queue states consumed by successive reads before the default applies.
    pub fn queue_states(&self, entity_id: &str, states: &[&str]) {
        let queue = states.iter().map(|s| EntityState::new(*s)).collect();
        self.state_queues
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), queue);
    }

    /// Make every service call fail (state reads are unaffected).
    pub fn fail_all_services(&self, fail: bool) {
        self.fail_services.store(fail, Ordering::SeqCst);
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn plays(&self) -> Vec<PlayMediaCall> {
        self.plays.lock().unwrap().clone()
    }

    fn record(&self, method: &str, args: &[&str]) -> Result<(), HassError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        });
        if self.fail_services.load(Ordering::SeqCst) {
            return Err(HassError::Api {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HomeAssistant for MockHomeAssistant {
    async fn power_on_device(&self, device_id: &str) -> Result<(), HassError> {
        self.record("power_on_device", &[device_id])
    }

    async fn power_on_entity(&self, entity_id: &str) -> Result<(), HassError> {
        self.record("power_on_entity", &[entity_id])
    }

    async fn remote_power_on(&self, entity_id: &str) -> Result<(), HassError> {
        self.record("remote_power_on", &[entity_id])
    }

    async fn select_source(&self, entity_id: &str, source: &str) -> Result<(), HassError> {
        self.record("select_source", &[entity_id, source])
    }

    async fn press_button(&self, entity_id: &str) -> Result<(), HassError> {
        self.record("press_button", &[entity_id])
    }

    async fn entity_state(&self, entity_id: &str) -> Result<EntityState, HassError> {
        if let Some(queue) = self.state_queues.lock().unwrap().get_mut(entity_id) {
            if let Some(state) = queue.pop_front() {
                return Ok(state);
            }
        }
        self.states
            .read()
            .unwrap()
            .get(entity_id)
            .cloned()
            .ok_or_else(|| HassError::UnknownEntity(entity_id.to_string()))
    }

    async fn play_media(
        &self,
        target: &MediaTarget,
        content_id: &str,
        content_type: &str,
    ) -> Result<(), HassError> {
        let target_arg = match target {
            MediaTarget::Device(id) => format!("device:{}", id),
            MediaTarget::Entity(id) => format!("entity:{}", id),
        };
        self.record("play_media", &[&target_arg, content_id, content_type])?;
        self.plays.lock().unwrap().push(PlayMediaCall {
            target: target.clone(),
            content_id: content_id.to_string(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_default() {
        let hass = MockHomeAssistant::new();
        hass.set_state("media_player.tv", "on");
        hass.queue_states("media_player.tv", &["off", "off"]);

        assert_eq!(hass.entity_state("media_player.tv").await.unwrap().state, "off");
        assert_eq!(hass.entity_state("media_player.tv").await.unwrap().state, "off");
        assert_eq!(hass.entity_state("media_player.tv").await.unwrap().state, "on");
    }

    #[tokio::test]
    async fn test_unknown_entity_errors() {
        let hass = MockHomeAssistant::new();
        assert!(matches!(
            hass.entity_state("media_player.ghost").await,
            Err(HassError::UnknownEntity(_))
        ));
    }

    #[tokio::test]
    async fn test_records_in_call_order() {
        let hass = MockHomeAssistant::new();
        hass.power_on_device("dev").await.unwrap();
        hass.press_button("btn").await.unwrap();

        let calls = hass.recorded_calls();
        assert_eq!(calls[0].method, "power_on_device");
        assert_eq!(calls[1].method, "press_button");
    }
}
