//! Property tests for aggregation and execution.

use proptest::prelude::*;
use revkeep_core::models::{
    Decision, HeadResolution, Lineage, PolicyVerdicts, Verdict, VerdictMap, VersionId,
};
use revkeep_retention::{aggregate, execute, RetentionPlan};
use test_fixtures::{linear_lineage, InMemoryStorage};

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    prop_oneof![Just(Verdict::Allow), Just(Verdict::Keep), Just(Verdict::Abstain)]
}

/// A lineage of `1..=n` versions with an arbitrary head, plus up to five
/// policies voting arbitrarily on every version (the head included).
fn arb_case() -> impl Strategy<Value = (Lineage, Vec<PolicyVerdicts>)> {
    (1u64..12).prop_flat_map(|n| {
        let head = 1..=n;
        let policies = prop::collection::vec(
            prop::collection::vec(arb_verdict(), n as usize),
            0..5,
        );
        (Just(n), head, policies).prop_map(|(n, head, policies)| {
            let mut versions = linear_lineage("en", 1..=n);
            versions.reverse();
            let lineage = Lineage {
                tag: "en".to_string(),
                versions,
                head: VersionId(head),
                head_resolution: HeadResolution::Flagged,
            };
            let verdicts = policies
                .into_iter()
                .enumerate()
                .map(|(i, votes)| {
                    let map: VerdictMap = votes
                        .into_iter()
                        .enumerate()
                        .map(|(j, v)| (VersionId(j as u64 + 1), v))
                        .collect();
                    PolicyVerdicts::new(format!("p{i}"), map)
                })
                .collect();
            (lineage, verdicts)
        })
    })
}

/// A case plus an arbitrary permutation of its policy verdicts.
fn arb_permuted_case() -> impl Strategy<Value = (Lineage, Vec<PolicyVerdicts>, Vec<PolicyVerdicts>)> {
    arb_case().prop_flat_map(|(lineage, verdicts)| {
        let shuffled = Just(verdicts.clone()).prop_shuffle();
        (Just(lineage), Just(verdicts), shuffled)
    })
}

fn votes(verdicts: &[PolicyVerdicts], id: VersionId) -> Vec<Verdict> {
    verdicts.iter().map(|pv| pv.verdict_for(id)).collect()
}

proptest! {
    #[test]
    fn head_is_never_deleted((lineage, verdicts) in arb_case()) {
        let out = aggregate(&lineage, &verdicts);
        let head = out.decision_for(lineage.head).unwrap();
        prop_assert_eq!(head.decision, Decision::Retain);
    }

    #[test]
    fn any_keep_retains((lineage, verdicts) in arb_case()) {
        let out = aggregate(&lineage, &verdicts);
        for v in &lineage.versions {
            if votes(&verdicts, v.id).contains(&Verdict::Keep) {
                prop_assert_eq!(out.decision_for(v.id).unwrap().decision, Decision::Retain);
            }
        }
    }

    #[test]
    fn one_allow_without_keep_deletes((lineage, verdicts) in arb_case()) {
        let out = aggregate(&lineage, &verdicts);
        for v in lineage.non_head() {
            let vs = votes(&verdicts, v.id);
            if vs.contains(&Verdict::Allow) && !vs.contains(&Verdict::Keep) {
                prop_assert_eq!(out.decision_for(v.id).unwrap().decision, Decision::Delete);
            }
        }
    }

    #[test]
    fn deletion_needs_a_supporter((lineage, verdicts) in arb_case()) {
        let out = aggregate(&lineage, &verdicts);
        for (id, d) in out.to_delete() {
            prop_assert!(!d.allowed_by.is_empty());
            prop_assert!(votes(&verdicts, id).contains(&Verdict::Allow));
        }
    }

    #[test]
    fn adding_an_abstaining_policy_changes_nothing((lineage, verdicts) in arb_case()) {
        let before = aggregate(&lineage, &verdicts);
        let mut more = verdicts.clone();
        more.push(PolicyVerdicts::abstaining("silent"));
        let after = aggregate(&lineage, &more);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn adding_a_keep_never_adds_deletions((lineage, verdicts) in arb_case(), target in 1u64..12) {
        let before = aggregate(&lineage, &verdicts);
        let mut more = verdicts.clone();
        let mut map = VerdictMap::new();
        map.insert(VersionId(target), Verdict::Keep);
        more.push(PolicyVerdicts::new("veto", map));
        let after = aggregate(&lineage, &more);
        for (id, _) in after.to_delete() {
            prop_assert!(before.decision_for(id).unwrap().is_delete());
        }
    }

    #[test]
    fn policy_order_does_not_matter((lineage, verdicts, shuffled) in arb_permuted_case()) {
        prop_assert_eq!(aggregate(&lineage, &verdicts), aggregate(&lineage, &shuffled));
    }

    #[test]
    fn executing_twice_deletes_once((lineage, verdicts) in arb_case()) {
        let storage = InMemoryStorage::new();
        storage.insert_item(
            revkeep_core::models::ContentItemMeta::new("item", "page"),
            lineage.versions.clone(),
        );
        let mut plan = RetentionPlan::new("item");
        plan.insert(aggregate(&lineage, &verdicts));

        let first = execute(&storage, &plan).unwrap();
        prop_assert!(storage.version_ids("item").contains(&lineage.head));

        // Re-plan from what is left, as a redelivery would.
        let remaining: Vec<_> = lineage
            .versions
            .iter()
            .filter(|v| storage.version_ids("item").contains(&v.id))
            .cloned()
            .collect();
        let relineage = Lineage { versions: remaining, ..lineage.clone() };
        let mut replan = RetentionPlan::new("item");
        replan.insert(aggregate(&relineage, &verdicts));
        let second = execute(&storage, &replan).unwrap();

        prop_assert_eq!(second.deletions.len(), 0);
        prop_assert_eq!(storage.delete_log().len(), first.deletions.len());
    }
}
