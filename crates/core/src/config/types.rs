use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub home_assistant: HomeAssistantConfig,
    pub plex: PlexConfig,
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub readiness: ReadinessConfig,
    /// Zone used when a command names no room or an unknown one.
    pub default_zone: String,
    pub zones: HashMap<String, ZoneConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Home Assistant REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HomeAssistantConfig {
    /// Base URL, e.g. "http://homeassistant.local:8123"
    pub url: String,
    /// Long-lived access token
    pub token: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Plex server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlexConfig {
    /// Base URL, e.g. "https://192.168.1.10:32400"
    pub url: String,
    /// Plex auth token, sent in the query string
    pub token: String,
    /// Verify TLS certificates (Plex often runs with a self-signed cert)
    #[serde(default)]
    pub verify_tls: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Catalog refresh interval in seconds (default: hourly)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_timeout() -> u32 {
    30
}

fn default_refresh_interval() -> u64 {
    3600
}

/// Intent translator (LLM) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslatorConfig {
    pub provider: LlmProvider,
    /// Model name, e.g. "claude-3-haiku-20240307" or "llama3"
    pub model: String,
    /// API key (required for anthropic, unused for ollama)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override the provider's default API base URL
    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    Anthropic,
    Ollama,
}

/// Hardware readiness tuning.
///
/// The poll knobs exist for tests; the defaults are the production values
/// (10 attempts, 3 seconds apart, ~30s worst case).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadinessConfig {
    /// Entity id of the Plex "scan clients" button exposed by the
    /// Home Assistant Plex integration.
    #[serde(default = "default_scan_button")]
    pub scan_button: String,
    /// Source name to select on the display hardware.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            scan_button: default_scan_button(),
            app_name: default_app_name(),
            poll_attempts: default_poll_attempts(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_scan_button() -> String {
    "button.plex_scan_clients".to_string()
}

fn default_app_name() -> String {
    "Plex".to_string()
}

fn default_poll_attempts() -> u32 {
    10
}

fn default_poll_interval() -> u64 {
    3
}

/// A playback zone: one room with its own display hardware and Plex client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Plex media_player entity for this zone's client.
    pub plex_client: String,
    /// Plex client device id; when present the final play command is
    /// addressed by device instead of entity.
    #[serde(default)]
    pub plex_device_id: Option<String>,
    /// media_player entity of the display hardware (TV, set-top box).
    #[serde(default)]
    pub hardware_entity: Option<String>,
    /// Home Assistant device id of the display hardware.
    #[serde(default)]
    pub hardware_device_id: Option<String>,
    /// remote entity used by the `remote` power method.
    #[serde(default)]
    pub remote_entity: Option<String>,
    pub power_method: PowerMethod,
    /// Seconds the hardware needs from power-on to accepting input.
    pub boot_delay_secs: u64,
    /// Seconds the media app needs to launch after source selection.
    pub app_load_delay_secs: u64,
}

/// How a zone's display hardware gets powered on.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PowerMethod {
    /// Unconditional power-on by device id. Also forces source selection,
    /// since the device reports no usable source state.
    Device,
    /// Power-on by device id only if the hardware reports off/unavailable.
    Conditional,
    /// Power-on through a remote entity.
    Remote,
    /// Generic media_player turn_on by entity id.
    Generic,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub home_assistant: SanitizedHomeAssistantConfig,
    pub plex: SanitizedPlexConfig,
    pub translator: SanitizedTranslatorConfig,
    pub readiness: ReadinessConfig,
    pub default_zone: String,
    pub zones: HashMap<String, ZoneConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedHomeAssistantConfig {
    pub url: String,
    pub token: String,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPlexConfig {
    pub url: String,
    pub token: String,
    pub verify_tls: bool,
    pub timeout_secs: u32,
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTranslatorConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
}

const REDACTED: &str = "***";

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            home_assistant: SanitizedHomeAssistantConfig {
                url: config.home_assistant.url.clone(),
                token: REDACTED.to_string(),
                timeout_secs: config.home_assistant.timeout_secs,
            },
            plex: SanitizedPlexConfig {
                url: config.plex.url.clone(),
                token: REDACTED.to_string(),
                verify_tls: config.plex.verify_tls,
                timeout_secs: config.plex.timeout_secs,
                refresh_interval_secs: config.plex.refresh_interval_secs,
            },
            translator: SanitizedTranslatorConfig {
                provider: config.translator.provider,
                model: config.translator.model.clone(),
                api_key: config.translator.api_key.as_ref().map(|_| REDACTED.to_string()),
                api_base: config.translator.api_base.clone(),
            },
            readiness: config.readiness.clone(),
            default_zone: config.default_zone.clone(),
            zones: config.zones.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            server: ServerConfig::default(),
            home_assistant: HomeAssistantConfig {
                url: "http://ha.local:8123".to_string(),
                token: "secret-ha-token".to_string(),
                timeout_secs: 30,
            },
            plex: PlexConfig {
                url: "https://plex.local:32400".to_string(),
                token: "secret-plex-token".to_string(),
                verify_tls: false,
                timeout_secs: 30,
                refresh_interval_secs: 3600,
            },
            translator: TranslatorConfig {
                provider: LlmProvider::Anthropic,
                model: "claude-3-haiku-20240307".to_string(),
                api_key: Some("secret-api-key".to_string()),
                api_base: None,
            },
            readiness: ReadinessConfig::default(),
            default_zone: "living_room".to_string(),
            zones: HashMap::new(),
        }
    }

    #[test]
    fn test_sanitized_config_redacts_secrets() {
        let config = sample_config();
        let sanitized = SanitizedConfig::from(&config);

        assert_eq!(sanitized.home_assistant.token, "***");
        assert_eq!(sanitized.plex.token, "***");
        assert_eq!(sanitized.translator.api_key, Some("***".to_string()));

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-ha-token"));
        assert!(!json.contains("secret-plex-token"));
        assert!(!json.contains("secret-api-key"));
    }

    #[test]
    fn test_readiness_defaults() {
        let readiness = ReadinessConfig::default();
        assert_eq!(readiness.poll_attempts, 10);
        assert_eq!(readiness.poll_interval_secs, 3);
        assert_eq!(readiness.app_name, "Plex");
    }
}
