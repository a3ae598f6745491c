//! # revkeep-core
//!
//! Foundation crate for the revkeep retention engine.
//! Defines the version/lineage/verdict model, the collaborator traits,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RevkeepConfig;
pub use errors::{RevkeepError, RevkeepResult};
pub use models::{
    ContentItemMeta, Decision, Lineage, PolicyConfig, RetentionSummary, Verdict, VerdictMap,
    VersionId, VersionMeta,
};
