//! Property tests for the built-in policies.

use chrono::Duration;
use proptest::prelude::*;
use revkeep_core::models::{EvaluationContext, HeadResolution, Lineage, Verdict, VersionId};
use revkeep_core::traits::IRetentionPolicy;
use revkeep_policy::{KeepNewestPolicy, KeepYoungerThanPolicy};
use test_fixtures::{base_time, linear_lineage};

fn lineage(n: u64, head: u64) -> Lineage {
    let mut versions = linear_lineage("en", 1..=n);
    versions.reverse();
    Lineage {
        tag: "en".to_string(),
        versions,
        head: VersionId(head),
        head_resolution: HeadResolution::Flagged,
    }
}

fn arb_lineage() -> impl Strategy<Value = Lineage> {
    (1u64..30).prop_flat_map(|n| (Just(n), 1..=n)).prop_map(|(n, head)| lineage(n, head))
}

proptest! {
    #[test]
    fn keep_newest_allows_exactly_the_overflow(l in arb_lineage(), count in 1usize..40) {
        let verdicts = KeepNewestPolicy::new("k", count)
            .evaluate(&l, &EvaluationContext::default())
            .unwrap();
        prop_assert_eq!(verdicts.len(), l.len().saturating_sub(count));
        prop_assert!(!verdicts.contains_key(&l.head));
        prop_assert!(verdicts.values().all(|v| *v == Verdict::Allow));
    }

    #[test]
    fn keep_newest_allows_the_oldest(l in arb_lineage(), count in 1usize..40) {
        let verdicts = KeepNewestPolicy::new("k", count)
            .evaluate(&l, &EvaluationContext::default())
            .unwrap();
        // Every allowed version is older than every non-head version in the window.
        let kept: Vec<u64> = l
            .non_head()
            .map(|v| v.sequence)
            .filter(|s| !verdicts.contains_key(&VersionId(*s)))
            .collect();
        for id in verdicts.keys() {
            prop_assert!(kept.iter().all(|s| *s > id.0));
        }
    }

    #[test]
    fn age_policy_never_touches_head(l in arb_lineage(), days in 0u32..400, offset in 0i64..400) {
        let now = base_time() + Duration::days(offset);
        let verdicts = KeepYoungerThanPolicy::new("young", days)
            .evaluate(&l, &EvaluationContext::at(now))
            .unwrap();
        prop_assert!(!verdicts.contains_key(&l.head));
    }
}
