use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque version identity assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub u64);

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VersionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One historical snapshot as reported by the storage provider.
///
/// Immutable once created; the only change the engine ever makes is to
/// delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMeta {
    pub id: VersionId,
    /// Monotonically increasing creation order within the item.
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
    /// Language/branch tag. `None` when the host could not determine it.
    #[serde(default)]
    pub lineage_tag: Option<String>,
    /// Host flag: this version is the item's current version for its lineage.
    #[serde(default)]
    pub is_current: bool,
    /// Host flag: this version carries the latest change affecting its lineage.
    #[serde(default)]
    pub is_latest_for_lineage: bool,
    /// Whether the version was ever published.
    #[serde(default)]
    pub published: bool,
    /// Free-form editorial labels (e.g. `editorial_hold`).
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl VersionMeta {
    /// Whether the host flags mark this version as its lineage head.
    pub fn is_flagged_head(&self) -> bool {
        self.is_current && self.is_latest_for_lineage
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}
