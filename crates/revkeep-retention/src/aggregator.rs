//! Verdict aggregation: veto with at least one supporter.

use std::collections::BTreeMap;

use revkeep_core::models::{
    Decision, DecisionReason, Lineage, PolicyVerdicts, Verdict, VersionDecision, VersionId,
};
use serde::{Deserialize, Serialize};

/// Decisions for every version of one lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageDecisions {
    pub lineage: String,
    pub head: VersionId,
    pub decisions: BTreeMap<VersionId, VersionDecision>,
}

impl LineageDecisions {
    pub fn decision_for(&self, id: VersionId) -> Option<&VersionDecision> {
        self.decisions.get(&id)
    }

    /// Versions decided `Delete`, ascending.
    pub fn to_delete(&self) -> impl Iterator<Item = (VersionId, &VersionDecision)> {
        self.decisions
            .iter()
            .filter(|(_, d)| d.is_delete())
            .map(|(id, d)| (*id, d))
    }

    pub fn retained_count(&self) -> usize {
        self.decisions.values().filter(|d| !d.is_delete()).count()
    }
}

/// Combine the verdicts of every policy for one lineage.
///
/// 1. the head is retained unconditionally;
/// 2. any `Keep` retains;
/// 3. otherwise any `Allow` deletes;
/// 4. otherwise the version is retained.
///
/// Verdicts for ids outside the lineage are ignored. The result does not
/// depend on the order of `verdicts`.
pub fn aggregate(lineage: &Lineage, verdicts: &[PolicyVerdicts]) -> LineageDecisions {
    let decisions = lineage
        .versions
        .iter()
        .map(|version| (version.id, decide(lineage, version.id, verdicts)))
        .collect();

    LineageDecisions {
        lineage: lineage.tag.clone(),
        head: lineage.head,
        decisions,
    }
}

fn decide(lineage: &Lineage, id: VersionId, verdicts: &[PolicyVerdicts]) -> VersionDecision {
    let mut allowed_by = Vec::new();
    let mut kept_by = Vec::new();
    for pv in verdicts {
        match pv.verdict_for(id) {
            Verdict::Allow => allowed_by.push(pv.policy.clone()),
            Verdict::Keep => kept_by.push(pv.policy.clone()),
            Verdict::Abstain => {}
        }
    }
    allowed_by.sort();
    allowed_by.dedup();
    kept_by.sort();
    kept_by.dedup();

    let (decision, reason) = if lineage.is_head(id) {
        (Decision::Retain, DecisionReason::Head)
    } else if !kept_by.is_empty() {
        (Decision::Retain, DecisionReason::Vetoed)
    } else if !allowed_by.is_empty() {
        (Decision::Delete, DecisionReason::Allowed)
    } else {
        (Decision::Retain, DecisionReason::NoConsent)
    };

    VersionDecision {
        decision,
        reason,
        allowed_by,
        kept_by,
    }
}
