// Single source of truth for all default values.

// --- Retention ---
pub const DEFAULT_LINEAGE: &str = crate::constants::UNDETERMINED_LINEAGE;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_BATCH_SIZE: usize = 32;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "revkeep.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_CLAIM_TIMEOUT_SECS: u64 = 300; // 5 minutes

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
