//! Error handling for revkeep.
//! One error enum per subsystem, `thiserror` only, aggregated by `RevkeepError`.

pub mod config_error;
pub mod invariant_error;
pub mod policy_error;
pub mod queue_error;
pub mod revkeep_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use invariant_error::InvariantError;
pub use policy_error::PolicyError;
pub use queue_error::QueueError;
pub use revkeep_error::{RevkeepError, RevkeepResult};
pub use storage_error::StorageError;
