/// revkeep version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lineage tag used when neither a version nor its item names one.
/// Matches the "undetermined" language code.
pub const UNDETERMINED_LINEAGE: &str = "und";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "REVKEEP_";

/// Maximum number of items claimed by one batch run.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Maximum worker threads for batch processing.
pub const MAX_WORKERS: usize = 64;
