use serde::{Deserialize, Serialize};

use super::{LineageAnomaly, VersionId};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Decisions were computed and executed.
    Completed,
    /// The item no longer exists; nothing to do.
    ItemMissing,
}

/// A version that was deleted and the policies that allowed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionRecord {
    pub version_id: VersionId,
    pub lineage: String,
    pub allowed_by: Vec<String>,
}

/// A delete call that failed. Retried implicitly by the next delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFailure {
    pub version_id: VersionId,
    pub lineage: String,
    pub error: String,
}

/// A policy that could not be built or evaluated; treated as abstaining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFailure {
    pub policy: String,
    /// `None` when the policy failed to build and abstained on every lineage.
    pub lineage: Option<String>,
    pub reason: String,
}

/// Per-item report of one retention run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionSummary {
    pub item_id: String,
    pub outcome: RunOutcome,
    pub retained: usize,
    pub deleted: usize,
    pub failed: usize,
    pub deletions: Vec<DeletionRecord>,
    pub failures: Vec<DeleteFailure>,
    pub policy_failures: Vec<PolicyFailure>,
    pub anomalies: Vec<LineageAnomaly>,
}

impl RetentionSummary {
    pub fn new(item_id: impl Into<String>, outcome: RunOutcome) -> Self {
        Self {
            item_id: item_id.into(),
            outcome,
            retained: 0,
            deleted: 0,
            failed: 0,
            deletions: Vec::new(),
            failures: Vec::new(),
            policy_failures: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    /// Summary for an item that no longer exists.
    pub fn item_missing(item_id: impl Into<String>) -> Self {
        Self::new(item_id, RunOutcome::ItemMissing)
    }

    /// True when every delete that was attempted succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    pub fn deleted_ids(&self) -> Vec<VersionId> {
        self.deletions.iter().map(|d| d.version_id).collect()
    }
}
