use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// SQLite adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u32,
    /// Seconds after which an unacknowledged claim is redelivered.
    pub claim_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DEFAULT_DB_FILENAME),
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            claim_timeout_secs: defaults::DEFAULT_CLAIM_TIMEOUT_SECS,
        }
    }
}
