//! Typed decoding of `PolicyConfig::settings`.

use revkeep_core::errors::PolicyError;
use revkeep_core::models::PolicyConfig;
use serde::de::DeserializeOwned;

/// Decode the settings of `config` into `T`. Missing settings decode as `{}`.
pub fn parse_settings<T: DeserializeOwned>(config: &PolicyConfig) -> Result<T, PolicyError> {
    let value = if config.settings.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        config.settings.clone()
    };
    serde_json::from_value(value).map_err(|e| PolicyError::InvalidSettings {
        name: config.name.clone(),
        reason: e.to_string(),
    })
}

/// Reject a setting value with a readable reason.
pub fn invalid(config: &PolicyConfig, reason: impl Into<String>) -> PolicyError {
    PolicyError::InvalidSettings {
        name: config.name.clone(),
        reason: reason.into(),
    }
}
