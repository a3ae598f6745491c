//! Configuration for revkeep.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;
pub mod observability_config;
pub mod policy_table;
pub mod retention_config;
pub mod revkeep_config;
pub mod storage_config;

pub use observability_config::ObservabilityConfig;
pub use policy_table::{ConfigPolicyStore, PolicyEntry};
pub use retention_config::RetentionConfig;
pub use revkeep_config::RevkeepConfig;
pub use storage_config::StorageConfig;
