//! LineageBuilder: flat version list in, independent lineages out.

use std::collections::{BTreeMap, HashSet};

use revkeep_core::models::{ContentItemMeta, Lineage, LineageAnomaly, VersionId, VersionMeta};
use revkeep_observability::events;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::head::resolve_head;

/// Every lineage of one item plus the anomalies found while building them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageSet {
    pub item_id: String,
    /// Keyed by lineage tag. Every lineage is non-empty and has a head.
    pub lineages: BTreeMap<String, Lineage>,
    pub anomalies: Vec<LineageAnomaly>,
}

impl LineageSet {
    pub fn get(&self, tag: &str) -> Option<&Lineage> {
        self.lineages.get(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lineage> {
        self.lineages.values()
    }

    /// Head version per lineage tag.
    pub fn heads(&self) -> BTreeMap<String, VersionId> {
        self.lineages
            .iter()
            .map(|(tag, lineage)| (tag.clone(), lineage.head))
            .collect()
    }

    pub fn version_count(&self) -> usize {
        self.lineages.values().map(Lineage::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }
}

/// Builds lineages from a storage listing.
#[derive(Debug, Clone)]
pub struct LineageBuilder {
    /// Used for untagged versions when the item has no primary lineage.
    default_lineage: String,
}

impl LineageBuilder {
    pub fn new(default_lineage: impl Into<String>) -> Self {
        Self {
            default_lineage: default_lineage.into(),
        }
    }

    /// Partition `versions` into lineages.
    ///
    /// Never fails. Untagged versions join the item's primary lineage (or the
    /// builder default), duplicate ids keep their first occurrence, and a
    /// lineage with inconsistent head flags falls back to its newest version.
    /// Each repair is logged and recorded in `anomalies`.
    pub fn build(&self, item: &ContentItemMeta, versions: Vec<VersionMeta>) -> LineageSet {
        let fallback_tag = item
            .primary_lineage
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.default_lineage)
            .to_string();

        let mut anomalies = Vec::new();
        let mut seen = HashSet::with_capacity(versions.len());
        let mut groups: BTreeMap<String, Vec<VersionMeta>> = BTreeMap::new();

        for version in versions {
            if !seen.insert(version.id) {
                anomalies.push(LineageAnomaly::DuplicateVersion {
                    version_id: version.id,
                });
                continue;
            }

            let tag = match version.lineage_tag.as_deref() {
                Some(tag) if !tag.trim().is_empty() => tag.to_string(),
                _ => {
                    anomalies.push(LineageAnomaly::UntaggedVersion {
                        version_id: version.id,
                        assigned_to: fallback_tag.clone(),
                    });
                    fallback_tag.clone()
                }
            };
            groups.entry(tag).or_default().push(version);
        }

        let mut lineages = BTreeMap::new();
        for (tag, mut members) in groups {
            members.sort_by(|a, b| (b.sequence, b.id).cmp(&(a.sequence, a.id)));

            // Groups are created on first insert, so never empty.
            let Some((head, head_resolution)) = resolve_head(&members) else {
                continue;
            };
            if head_resolution.is_fallback() {
                anomalies.push(LineageAnomaly::HeadFallback {
                    lineage: tag.clone(),
                    head,
                    resolution: head_resolution.clone(),
                });
            }

            debug!(
                item_id = %item.id,
                lineage = %tag,
                versions = members.len(),
                head = head.0,
                "lineage built"
            );
            lineages.insert(
                tag.clone(),
                Lineage {
                    tag,
                    versions: members,
                    head,
                    head_resolution,
                },
            );
        }

        for anomaly in &anomalies {
            events::lineage_anomaly(&item.id, anomaly);
        }

        LineageSet {
            item_id: item.id.clone(),
            lineages,
            anomalies,
        }
    }
}

impl Default for LineageBuilder {
    fn default() -> Self {
        Self::new(revkeep_core::config::defaults::DEFAULT_LINEAGE)
    }
}
