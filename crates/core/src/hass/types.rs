use serde::{Deserialize, Serialize};

/// Reported state of a Home Assistant entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityState {
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Currently active source, for media_player entities.
    pub fn source(&self) -> Option<&str> {
        self.attributes.get("source").and_then(|v| v.as_str())
    }

    /// True for the states meaning "not usable as a playback client".
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state.as_str(), "unavailable" | "unknown" | "off")
    }
}

/// Addressing for the final playback command: by device when the zone knows
/// its client's device id, by entity otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaTarget {
    Device(String),
    Entity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_states() {
        for state in ["unavailable", "unknown", "off"] {
            assert!(EntityState::new(state).is_unavailable(), "{}", state);
        }
        for state in ["idle", "playing", "paused", "on"] {
            assert!(!EntityState::new(state).is_unavailable(), "{}", state);
        }
    }

    #[test]
    fn test_source_attribute() {
        let state = EntityState::new("on").with_attribute("source", "Plex");
        assert_eq!(state.source(), Some("Plex"));
        assert_eq!(EntityState::new("on").source(), None);
    }
}
