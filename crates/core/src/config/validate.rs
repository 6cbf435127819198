use super::{
    types::{Config, PowerMethod},
    ConfigError,
};

/// Validate configuration beyond what serde enforces:
/// - server port is not 0
/// - at least one zone, and `default_zone` names one of them
/// - each zone carries the references its power method needs
/// - readiness poll budget is sane
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.zones.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one zone must be configured".to_string(),
        ));
    }

    if !config.zones.contains_key(&config.default_zone) {
        return Err(ConfigError::ValidationError(format!(
            "default_zone '{}' is not a configured zone",
            config.default_zone
        )));
    }

    for (name, zone) in &config.zones {
        match zone.power_method {
            PowerMethod::Device | PowerMethod::Conditional => {
                if zone.hardware_device_id.is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "zone '{}': power_method '{:?}' requires hardware_device_id",
                        name, zone.power_method
                    )));
                }
            }
            PowerMethod::Remote => {
                if zone.remote_entity.is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "zone '{}': power_method 'remote' requires remote_entity",
                        name
                    )));
                }
            }
            PowerMethod::Generic => {
                if zone.hardware_entity.is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "zone '{}': power_method 'generic' requires hardware_entity",
                        name
                    )));
                }
            }
        }
    }

    if config.readiness.poll_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "readiness.poll_attempts must be at least 1".to_string(),
        ));
    }

    Ok(())
}
