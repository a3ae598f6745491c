//! Events must be callable without a subscriber and summaries must serialize.

use revkeep_core::config::ObservabilityConfig;
use revkeep_core::errors::{InvariantError, RevkeepError};
use revkeep_core::models::*;
use revkeep_observability::events;

fn sample_summary() -> RetentionSummary {
    let mut summary = RetentionSummary::new("node-1", RunOutcome::Completed);
    summary.retained = 2;
    summary.deleted = 1;
    summary.deletions.push(DeletionRecord {
        version_id: VersionId(3),
        lineage: "en".to_string(),
        allowed_by: vec!["keep-2".to_string()],
    });
    summary
}

#[test]
fn events_do_not_panic_without_subscriber() {
    let summary = sample_summary();
    events::run_completed(&summary);
    events::lineage_anomaly(
        "node-1",
        &LineageAnomaly::HeadFallback {
            lineage: "en".to_string(),
            head: VersionId(5),
            resolution: HeadResolution::FallbackNoneFlagged,
        },
    );
    let err: RevkeepError = InvariantError::HeadDeletion {
        item_id: "node-1".to_string(),
        lineage: "en".to_string(),
        version_id: VersionId(5),
    }
    .into();
    events::invariant_violation(&sample_summary(), &err);
    events::item_buried("node-1", 1, err.error_code());
}

#[test]
fn summary_json_carries_responsible_policies() {
    let json = events::summary_json(&sample_summary());
    assert_eq!(json["outcome"], "completed");
    assert_eq!(json["deletions"][0]["version_id"], 3);
    assert_eq!(json["deletions"][0]["allowed_by"][0], "keep-2");
}

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    let first = revkeep_observability::init(&config);
    let second = revkeep_observability::init(&config);
    assert!(!second || !first, "only one global subscriber can be installed");
}

#[test]
fn span_macros_expand() {
    let _span = revkeep_observability::retention_span!("node-1").entered();
    let _lineage = revkeep_observability::lineage_span!("node-1", "en");
    let _delivery = revkeep_observability::delivery_span!("node-1", 2u32);
}

#[test]
fn violation_context_keeps_planning_findings() {
    let mut summary = sample_summary();
    summary.anomalies.push(LineageAnomaly::DuplicateVersion {
        version_id: VersionId(2),
    });
    summary.policy_failures.push(PolicyFailure {
        policy: "flaky".to_string(),
        lineage: Some("en".to_string()),
        reason: "panicked".to_string(),
    });

    let context = events::violation_context(&summary);

    assert_eq!(context["anomalies"].as_array().map(Vec::len), Some(1));
    assert_eq!(context["policy_failures"][0]["policy"], "flaky");
    assert_eq!(context["policy_failures"][0]["lineage"], "en");
}
