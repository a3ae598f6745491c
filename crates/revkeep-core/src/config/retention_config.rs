use serde::{Deserialize, Serialize};

use super::defaults;

/// Engine and work coordinator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Lineage for untagged versions of items without a primary lineage.
    pub default_lineage: String,
    /// Deliveries before a retryable failure is buried.
    pub max_attempts: u32,
    /// Worker threads for batch processing.
    pub workers: usize,
    /// Items claimed per batch.
    pub batch_size: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            default_lineage: defaults::DEFAULT_LINEAGE.to_string(),
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            workers: defaults::DEFAULT_WORKERS,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
        }
    }
}
