//! Data model shared across the pipeline.

pub mod content_item;
pub mod decision;
pub mod lineage;
pub mod policy_config;
pub mod summary;
pub mod verdict;
pub mod version;
pub mod work_item;

pub use content_item::ContentItemMeta;
pub use decision::{Decision, DecisionReason, VersionDecision};
pub use lineage::{HeadResolution, Lineage, LineageAnomaly};
pub use policy_config::PolicyConfig;
pub use summary::{
    DeleteFailure, DeletionRecord, PolicyFailure, RetentionSummary, RunOutcome,
};
pub use verdict::{EvaluationContext, PolicyVerdicts, Verdict, VerdictMap};
pub use version::{VersionId, VersionMeta};
pub use work_item::{WorkItem, WorkOutcome};
