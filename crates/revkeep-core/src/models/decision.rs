use serde::{Deserialize, Serialize};

/// Final per-version outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Delete,
    Retain,
}

/// Which aggregation rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Lineage head; retained unconditionally.
    Head,
    /// At least one policy returned `Keep`.
    Vetoed,
    /// No veto and at least one policy returned `Allow`.
    Allowed,
    /// Every policy abstained, or none was enabled.
    NoConsent,
}

/// Decision for one version together with the policies responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDecision {
    pub decision: Decision,
    pub reason: DecisionReason,
    /// Policies that returned `Allow`, sorted.
    pub allowed_by: Vec<String>,
    /// Policies that returned `Keep`, sorted.
    pub kept_by: Vec<String>,
}

impl VersionDecision {
    pub fn is_delete(&self) -> bool {
        self.decision == Decision::Delete
    }
}
