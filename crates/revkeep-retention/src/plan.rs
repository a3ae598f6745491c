//! The full set of decisions for one item, computed before any delete.

use std::collections::BTreeMap;

use revkeep_core::models::{VersionDecision, VersionId};
use serde::{Deserialize, Serialize};

use crate::aggregator::LineageDecisions;

/// Every lineage's decisions for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPlan {
    pub item_id: String,
    /// Keyed by lineage tag.
    pub lineages: BTreeMap<String, LineageDecisions>,
}

impl RetentionPlan {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            lineages: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, decisions: LineageDecisions) {
        self.lineages.insert(decisions.lineage.clone(), decisions);
    }

    /// `(lineage, version, decision)` for every planned delete.
    pub fn deletes(&self) -> impl Iterator<Item = (&str, VersionId, &VersionDecision)> {
        self.lineages
            .values()
            .flat_map(|l| l.to_delete().map(move |(id, d)| (l.lineage.as_str(), id, d)))
    }

    pub fn delete_count(&self) -> usize {
        self.deletes().count()
    }

    pub fn retained_count(&self) -> usize {
        self.lineages.values().map(LineageDecisions::retained_count).sum()
    }

    /// Head of every lineage in the plan.
    pub fn heads(&self) -> BTreeMap<&str, VersionId> {
        self.lineages
            .values()
            .map(|l| (l.lineage.as_str(), l.head))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }
}
