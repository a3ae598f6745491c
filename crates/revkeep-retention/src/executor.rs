//! Retention executor: guards the head invariant, then deletes.

use std::collections::BTreeMap;

use revkeep_core::errors::{InvariantError, RevkeepResult};
use revkeep_core::models::{DeleteFailure, DeletionRecord, RetentionSummary, VersionId};
use revkeep_core::traits::IVersionStorage;
use revkeep_observability::events;
use serde::{Deserialize, Serialize};

use crate::plan::RetentionPlan;

/// Per-version outcome of executing a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub retained: usize,
    pub deletions: Vec<DeletionRecord>,
    pub failures: Vec<DeleteFailure>,
}

impl ExecutionReport {
    /// Copy counts and per-version records into `summary`.
    pub fn fold_into(self, summary: &mut RetentionSummary) {
        summary.retained = self.retained;
        summary.deleted = self.deletions.len();
        summary.failed = self.failures.len();
        summary.deletions = self.deletions;
        summary.failures = self.failures;
    }
}

/// Check that no planned delete targets the head of any lineage in the plan,
/// and that every lineage has a decision for its head.
///
/// Checked against the recorded heads rather than the decision reasons, so a
/// defect in aggregation cannot slip past it.
pub fn verify_plan(plan: &RetentionPlan) -> Result<(), InvariantError> {
    let mut heads: BTreeMap<VersionId, &str> = BTreeMap::new();
    for lineage in plan.lineages.values() {
        if lineage.decision_for(lineage.head).is_none() {
            return Err(InvariantError::MissingHead {
                item_id: plan.item_id.clone(),
                lineage: lineage.lineage.clone(),
            });
        }
        heads.insert(lineage.head, lineage.lineage.as_str());
    }

    for (_, version_id, _) in plan.deletes() {
        if let Some(owner) = heads.get(&version_id) {
            return Err(InvariantError::HeadDeletion {
                item_id: plan.item_id.clone(),
                lineage: (*owner).to_string(),
                version_id,
            });
        }
    }
    Ok(())
}

/// Execute `plan` against storage.
///
/// The whole plan is verified first; on violation no delete is issued. A
/// failing delete is recorded and the remaining deletes still run.
pub fn execute(storage: &dyn IVersionStorage, plan: &RetentionPlan) -> RevkeepResult<ExecutionReport> {
    verify_plan(plan)?;

    let mut report = ExecutionReport {
        retained: plan.retained_count(),
        ..Default::default()
    };

    for (lineage, version_id, decision) in plan.deletes() {
        match storage.delete_version(&plan.item_id, version_id) {
            Ok(()) => {
                events::version_deleted(&plan.item_id, lineage, version_id, &decision.allowed_by);
                report.deletions.push(DeletionRecord {
                    version_id,
                    lineage: lineage.to_string(),
                    allowed_by: decision.allowed_by.clone(),
                });
            }
            Err(e) => {
                events::delete_failed(&plan.item_id, lineage, version_id, &e);
                report.failures.push(DeleteFailure {
                    version_id,
                    lineage: lineage.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
