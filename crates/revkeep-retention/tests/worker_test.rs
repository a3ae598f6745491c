//! Work coordinator over the in-memory queue.

use std::sync::Arc;

use revkeep_core::config::RetentionConfig;
use revkeep_core::errors::{ConfigError, RevkeepResult};
use revkeep_core::models::{ContentItemMeta, PolicyConfig, RunOutcome, VersionId, WorkOutcome};
use revkeep_core::traits::{IPolicyStore, IWorkQueue};
use revkeep_retention::{RetentionEngine, WorkCoordinator};
use serde_json::json;
use test_fixtures::{linear_lineage, InMemoryQueue, InMemoryStorage, StaticPolicyStore};

fn config(max_attempts: u32) -> RetentionConfig {
    RetentionConfig {
        max_attempts,
        workers: 4,
        batch_size: 8,
        ..Default::default()
    }
}

struct Harness {
    storage: Arc<InMemoryStorage>,
    queue: Arc<InMemoryQueue>,
    coordinator: WorkCoordinator,
}

fn harness_with(policies: Arc<dyn IPolicyStore>, max_attempts: u32) -> Harness {
    let storage = Arc::new(InMemoryStorage::new());
    let queue = Arc::new(InMemoryQueue::new());
    let engine = Arc::new(RetentionEngine::new(storage.clone(), policies));
    let coordinator = WorkCoordinator::new(engine, queue.clone(), &config(max_attempts)).unwrap();
    Harness {
        storage,
        queue,
        coordinator,
    }
}

fn harness(max_attempts: u32) -> Harness {
    harness_with(
        Arc::new(StaticPolicyStore::with_policies(
            "article",
            vec![PolicyConfig::new("keep-2", "keep_newest", json!({ "count": 2 }))],
        )),
        max_attempts,
    )
}

fn add_item(h: &Harness, id: &str, versions: u64) {
    h.storage
        .insert_item(ContentItemMeta::new(id, "article"), linear_lineage("en", 1..=versions));
    h.queue.enqueue(id).unwrap();
}

#[test]
fn empty_queue_yields_nothing() {
    let h = harness(3);
    assert!(h.coordinator.run_once().unwrap().is_none());
    assert!(h.coordinator.run_batch().unwrap().is_empty());
}

#[test]
fn processed_item_is_acked() {
    let h = harness(3);
    add_item(&h, "a", 5);

    match h.coordinator.run_once().unwrap() {
        Some(WorkOutcome::Acked { summary }) => assert_eq!(summary.deleted, 3),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(h.queue.acked(), vec!["a".to_string()]);
    assert_eq!(h.queue.in_flight(), 0);
}

#[test]
fn missing_item_is_acked() {
    let h = harness(3);
    h.queue.enqueue("ghost").unwrap();

    match h.coordinator.run_once().unwrap() {
        Some(WorkOutcome::Acked { summary }) => {
            assert_eq!(summary.outcome, RunOutcome::ItemMissing)
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn delete_failures_still_ack() {
    let h = harness(3);
    add_item(&h, "a", 5);
    h.storage.fail_delete("a", VersionId(1));

    let outcome = h.coordinator.run_once().unwrap().unwrap();
    match outcome {
        WorkOutcome::Acked { summary } => assert_eq!(summary.failed, 1),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn list_failure_released_then_buried_at_max_attempts() {
    let h = harness(2);
    add_item(&h, "a", 3);
    h.storage.fail_list("a");

    assert!(matches!(
        h.coordinator.run_once().unwrap(),
        Some(WorkOutcome::Released { .. })
    ));
    assert_eq!(h.queue.depth().unwrap(), 1);

    match h.coordinator.run_once().unwrap() {
        Some(WorkOutcome::Buried { item_id, reason }) => {
            assert_eq!(item_id, "a");
            assert!(reason.starts_with("STORAGE_LIST"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(h.queue.buried().len(), 1);
    assert_eq!(h.queue.depth().unwrap(), 0);
}

#[test]
fn transient_failure_recovers_on_redelivery() {
    let h = harness(5);
    add_item(&h, "a", 4);
    h.storage.fail_list("a");

    assert!(matches!(
        h.coordinator.run_once().unwrap(),
        Some(WorkOutcome::Released { .. })
    ));
    h.storage.clear_failures();
    assert!(matches!(
        h.coordinator.run_once().unwrap(),
        Some(WorkOutcome::Acked { .. })
    ));
    assert_eq!(h.storage.version_ids("a"), vec![VersionId(3), VersionId(4)]);
}

struct BrokenPolicyStore;

impl IPolicyStore for BrokenPolicyStore {
    fn list_enabled_policies(&self, _item_type: &str) -> RevkeepResult<Vec<PolicyConfig>> {
        Err(ConfigError::ValidationFailed {
            field: "policies".to_string(),
            message: "duplicate policy name".to_string(),
        }
        .into())
    }
}

#[test]
fn fatal_error_is_buried_immediately() {
    let h = harness_with(Arc::new(BrokenPolicyStore), 5);
    add_item(&h, "a", 3);

    match h.coordinator.run_once().unwrap() {
        Some(WorkOutcome::Buried { reason, .. }) => assert!(reason.starts_with("CONFIG")),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(h.storage.delete_log().is_empty());
}

#[test]
fn redelivery_after_crash_is_harmless() {
    let h = harness(3);
    add_item(&h, "a", 5);

    // First consumer processes the item but dies before acking.
    let claim = h.queue.claim().unwrap().unwrap();
    let engine_summary = {
        let engine = RetentionEngine::new(
            h.storage.clone(),
            Arc::new(StaticPolicyStore::with_policies(
                "article",
                vec![PolicyConfig::new("keep-2", "keep_newest", json!({ "count": 2 }))],
            )),
        );
        engine.process(&claim.item_id).unwrap()
    };
    assert_eq!(engine_summary.deleted, 3);
    h.queue.expire_claims();

    match h.coordinator.run_once().unwrap() {
        Some(WorkOutcome::Acked { summary }) => assert_eq!(summary.deleted, 0),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(h.storage.version_ids("a"), vec![VersionId(4), VersionId(5)]);
}

#[test]
fn drain_processes_every_item() {
    let h = harness(3);
    for id in ["a", "b", "c"] {
        add_item(&h, id, 4);
    }

    let outcomes = h.coordinator.drain().unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(h.queue.acked(), vec!["a", "b", "c"]);
}

#[test]
fn batches_run_in_parallel_and_drain_the_queue() {
    let h = harness(3);
    let ids: Vec<String> = (0..20).map(|i| format!("item-{i:02}")).collect();
    for id in &ids {
        add_item(&h, id, 6);
    }

    let first = h.coordinator.run_batch().unwrap();
    assert_eq!(first.len(), 8);

    let rest = h.coordinator.drain_parallel().unwrap();
    assert_eq!(first.len() + rest.len(), 20);

    let mut acked = h.queue.acked();
    acked.sort();
    assert_eq!(acked, ids);
    for id in &ids {
        assert_eq!(h.storage.version_ids(id), vec![VersionId(5), VersionId(6)]);
    }
}

#[test]
fn rejected_ack_does_not_discard_the_rest_of_the_batch() {
    let h = harness(3);
    for id in ["a", "b", "c"] {
        add_item(&h, id, 4);
    }
    h.queue.fail_ack("b");

    let outcomes = h.coordinator.run_batch().unwrap();

    assert_eq!(outcomes.len(), 3);
    let mut settled: Vec<&str> = outcomes
        .iter()
        .filter(|o| matches!(o, WorkOutcome::Acked { .. }))
        .map(WorkOutcome::item_id)
        .collect();
    settled.sort();
    assert_eq!(settled, vec!["a", "c"]);

    let failed = outcomes
        .iter()
        .find(|o| o.item_id() == "b")
        .expect("outcome for b");
    match failed {
        WorkOutcome::SettleFailed { error, summary, .. } => {
            assert!(error.contains("injected ack failure"));
            assert_eq!(summary.as_ref().map(|s| s.deleted), Some(2));
        }
        other => panic!("unexpected: {other:?}"),
    }

    let mut acked = h.queue.acked();
    acked.sort();
    assert_eq!(acked, vec!["a", "c"]);
    assert_eq!(h.storage.delete_log().len(), 6);
    // The unsettled claim stays outstanding until it times out.
    assert_eq!(h.queue.in_flight(), 1);
}

#[test]
fn rejected_ack_in_serial_drain_keeps_going() {
    let h = harness(3);
    for id in ["a", "b", "c"] {
        add_item(&h, id, 3);
    }
    h.queue.fail_ack("a");

    let outcomes = h.coordinator.drain().unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], WorkOutcome::SettleFailed { .. }));
    assert_eq!(h.queue.acked(), vec!["b", "c"]);
}
