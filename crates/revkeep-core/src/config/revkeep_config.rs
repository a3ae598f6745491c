//! Top-level revkeep configuration with layered resolution.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ConfigPolicyStore, ObservabilityConfig, PolicyEntry, RetentionConfig, StorageConfig,
};
use crate::constants::{ENV_PREFIX, MAX_BATCH_SIZE, MAX_WORKERS};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`REVKEEP_*`)
/// 2. Config file (`revkeep.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RevkeepConfig {
    pub retention: RetentionConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
    pub policies: Vec<PolicyEntry>,
}

impl RevkeepConfig {
    /// Load configuration from an optional file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    /// Pattern: `REVKEEP_MAX_ATTEMPTS`, `REVKEEP_DB_PATH`, etc.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("DEFAULT_LINEAGE") {
            self.retention.default_lineage = v;
        }
        if let Some(v) = var("MAX_ATTEMPTS").and_then(|v| v.parse().ok()) {
            self.retention.max_attempts = v;
        }
        if let Some(v) = var("WORKERS").and_then(|v| v.parse().ok()) {
            self.retention.workers = v;
        }
        if let Some(v) = var("BATCH_SIZE").and_then(|v| v.parse().ok()) {
            self.retention.batch_size = v;
        }
        if let Some(v) = var("DB_PATH") {
            self.storage.db_path = v.into();
        }
        if let Some(v) = var("BUSY_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.storage.busy_timeout_ms = v;
        }
        if let Some(v) = var("CLAIM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.storage.claim_timeout_secs = v;
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = var("JSON_LOGS").and_then(|v| parse_bool(&v)) {
            self.observability.json_logs = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.default_lineage.trim().is_empty() {
            return Err(invalid("retention.default_lineage", "must not be empty"));
        }
        if self.retention.max_attempts == 0 {
            return Err(invalid("retention.max_attempts", "must be greater than 0"));
        }
        if !(1..=MAX_WORKERS).contains(&self.retention.workers) {
            return Err(invalid(
                "retention.workers",
                &format!("must be between 1 and {MAX_WORKERS}"),
            ));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.retention.batch_size) {
            return Err(invalid(
                "retention.batch_size",
                &format!("must be between 1 and {MAX_BATCH_SIZE}"),
            ));
        }
        if self.storage.claim_timeout_secs == 0 {
            return Err(invalid("storage.claim_timeout_secs", "must be greater than 0"));
        }

        let mut seen = HashSet::new();
        for entry in &self.policies {
            if entry.name.trim().is_empty() {
                return Err(invalid("policies.name", "must not be empty"));
            }
            if entry.kind.trim().is_empty() {
                return Err(invalid(
                    &format!("policies.{}.kind", entry.name),
                    "must not be empty",
                ));
            }
            if !seen.insert((entry.item_type.as_str(), entry.name.as_str())) {
                return Err(invalid(
                    &format!("policies.{}", entry.name),
                    &format!("duplicate policy name for item type '{}'", entry.item_type),
                ));
            }
        }
        Ok(())
    }

    /// Policy store serving the `[[policies]]` table.
    pub fn policy_store(&self) -> ConfigPolicyStore {
        ConfigPolicyStore::new(self.policies.clone())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
