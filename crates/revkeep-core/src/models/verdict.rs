use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VersionId;

/// One policy's opinion on one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The policy consents to deletion.
    Allow,
    /// The policy forbids deletion.
    Keep,
    /// No opinion.
    Abstain,
}

/// Verdicts of a single policy over one lineage. Missing entries are `Abstain`.
pub type VerdictMap = BTreeMap<VersionId, Verdict>;

/// The verdicts a named policy produced for one lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdicts {
    pub policy: String,
    pub verdicts: VerdictMap,
}

impl PolicyVerdicts {
    pub fn new(policy: impl Into<String>, verdicts: VerdictMap) -> Self {
        Self {
            policy: policy.into(),
            verdicts,
        }
    }

    /// A policy that abstains on everything.
    pub fn abstaining(policy: impl Into<String>) -> Self {
        Self::new(policy, VerdictMap::new())
    }

    pub fn verdict_for(&self, id: VersionId) -> Verdict {
        self.verdicts.get(&id).copied().unwrap_or(Verdict::Abstain)
    }
}

/// Inputs a policy may depend on besides the lineage itself.
/// Supplying the clock here keeps policies pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub now: DateTime<Utc>,
}

impl EvaluationContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}
