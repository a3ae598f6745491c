//! Property tests for lineage building.

use std::collections::BTreeSet;

use proptest::prelude::*;
use revkeep_core::models::{ContentItemMeta, VersionMeta};
use revkeep_lineage::LineageBuilder;
use test_fixtures::version;

const TAGS: [&str; 3] = ["en", "fr", "de"];

/// Versions with unique ids, random tags (some untagged), and random head flags.
fn arb_history() -> impl Strategy<Value = Vec<VersionMeta>> {
    prop::collection::vec((0usize..4, any::<bool>(), any::<bool>()), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (tag, current, latest))| {
                let id = i as u64 + 1;
                let b = version(id).flags(current, latest);
                let b = match TAGS.get(tag) {
                    Some(t) => b.lineage(t),
                    None => b.untagged(),
                };
                b.build()
            })
            .collect()
    })
}

fn item() -> ContentItemMeta {
    ContentItemMeta::new("prop-item", "page").with_primary_lineage("en")
}

proptest! {
    #[test]
    fn every_version_lands_in_exactly_one_lineage(history in arb_history()) {
        let expected: BTreeSet<u64> = history.iter().map(|v| v.id.0).collect();
        let set = LineageBuilder::default().build(&item(), history);

        let mut seen = BTreeSet::new();
        for lineage in set.iter() {
            for v in &lineage.versions {
                prop_assert!(seen.insert(v.id.0), "version {} in two lineages", v.id);
            }
        }
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn every_lineage_has_one_head_among_its_versions(history in arb_history()) {
        let set = LineageBuilder::default().build(&item(), history);
        for lineage in set.iter() {
            prop_assert!(!lineage.is_empty());
            prop_assert!(lineage.contains(lineage.head));
            prop_assert_eq!(lineage.non_head().count(), lineage.len() - 1);
        }
    }

    #[test]
    fn lineages_are_ordered_newest_first(history in arb_history()) {
        let set = LineageBuilder::default().build(&item(), history);
        for lineage in set.iter() {
            prop_assert!(lineage
                .versions
                .windows(2)
                .all(|w| w[0].sequence >= w[1].sequence));
        }
    }

    #[test]
    fn input_order_does_not_matter(history in arb_history()) {
        let mut reversed = history.clone();
        reversed.reverse();
        let builder = LineageBuilder::default();
        let a = builder.build(&item(), history);
        let b = builder.build(&item(), reversed);
        prop_assert_eq!(a.heads(), b.heads());
        prop_assert_eq!(a.lineages, b.lineages);
    }
}
