//! Structured events emitted by the retention pipeline.
//!
//! Field names are stable; log processors key on them.

use revkeep_core::errors::RevkeepError;
use revkeep_core::models::{LineageAnomaly, PolicyFailure, RetentionSummary, VersionId};
use tracing::{debug, error, info, warn};

/// Lineage builder fell back or repaired host data.
pub fn lineage_anomaly(item_id: &str, anomaly: &LineageAnomaly) {
    match anomaly {
        LineageAnomaly::UntaggedVersion {
            version_id,
            assigned_to,
        } => warn!(
            item_id,
            version_id = version_id.0,
            assigned_to = %assigned_to,
            "version has no lineage tag; assigned to default lineage"
        ),
        LineageAnomaly::HeadFallback {
            lineage,
            head,
            resolution,
        } => warn!(
            item_id,
            lineage = %lineage,
            head = head.0,
            resolution = ?resolution,
            "inconsistent head flags; using highest sequence as head"
        ),
        LineageAnomaly::DuplicateVersion { version_id } => warn!(
            item_id,
            version_id = version_id.0,
            "duplicate version in listing; keeping first occurrence"
        ),
    }
}

/// A policy failed to build or evaluate and is treated as abstaining.
pub fn policy_failed(item_id: &str, failure: &PolicyFailure) {
    error!(
        item_id,
        policy = %failure.policy,
        lineage = failure.lineage.as_deref().unwrap_or("*"),
        reason = %failure.reason,
        "policy failed; treating as abstain"
    );
}

/// A single delete call failed; the run continues.
pub fn delete_failed(item_id: &str, lineage: &str, version_id: VersionId, err: &RevkeepError) {
    warn!(
        item_id,
        lineage,
        version_id = version_id.0,
        code = err.error_code(),
        error = %err,
        "version delete failed"
    );
}

/// A version was deleted.
pub fn version_deleted(item_id: &str, lineage: &str, version_id: VersionId, allowed_by: &[String]) {
    debug!(
        item_id,
        lineage,
        version_id = version_id.0,
        allowed_by = %allowed_by.join(","),
        "version deleted"
    );
}

/// Per-item summary of a completed run.
pub fn run_completed(summary: &RetentionSummary) {
    let responsible = summary
        .deletions
        .iter()
        .map(|d| format!("{}:{}", d.version_id, d.allowed_by.join("+")))
        .collect::<Vec<_>>()
        .join(",");
    info!(
        item_id = %summary.item_id,
        outcome = ?summary.outcome,
        retained = summary.retained,
        deleted = summary.deleted,
        failed = summary.failed,
        policy_failures = summary.policy_failures.len(),
        anomalies = summary.anomalies.len(),
        deletions = %responsible,
        "retention run complete"
    );
}

/// An item's executor step was aborted by an invariant violation. Carries
/// the anomalies and policy failures gathered while planning.
pub fn invariant_violation(summary: &RetentionSummary, err: &RevkeepError) {
    error!(
        item_id = %summary.item_id,
        code = err.error_code(),
        error = %err,
        context = %violation_context(summary),
        "FATAL invariant violation; executor aborted, item requires investigation"
    );
}

/// Planning context attached to an invariant violation.
pub fn violation_context(summary: &RetentionSummary) -> serde_json::Value {
    serde_json::json!({
        "anomalies": summary.anomalies,
        "policy_failures": summary.policy_failures,
    })
}

/// A delivery was taken out of circulation.
pub fn item_buried(item_id: &str, attempts: u32, reason: &str) {
    error!(item_id, attempts, reason, "work item buried");
}

/// A delivery was returned to the queue.
pub fn item_released(item_id: &str, attempts: u32, err: &RevkeepError) {
    warn!(
        item_id,
        attempts,
        code = err.error_code(),
        error = %err,
        "work item released for redelivery"
    );
}

/// The queue rejected a settle call; the delivery stays claimed until it
/// times out.
pub fn settle_failed(item_id: &str, attempts: u32, err: &RevkeepError) {
    error!(
        item_id,
        attempts,
        code = err.error_code(),
        error = %err,
        "work item could not be settled; awaiting claim timeout"
    );
}

/// Serialize a summary for report sinks that take JSON.
pub fn summary_json(summary: &RetentionSummary) -> serde_json::Value {
    serde_json::to_value(summary).unwrap_or(serde_json::Value::Null)
}
