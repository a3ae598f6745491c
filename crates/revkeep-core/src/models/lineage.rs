use serde::{Deserialize, Serialize};

use super::{VersionId, VersionMeta};

/// How the head of a lineage was determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadResolution {
    /// Exactly one version carried both host head flags.
    Flagged,
    /// No version carried both flags; highest sequence was used.
    FallbackNoneFlagged,
    /// Several versions carried both flags; highest sequence among all was used.
    FallbackMultipleFlagged { candidates: usize },
}

impl HeadResolution {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Flagged)
    }
}

/// Data-quality anomalies found while building lineages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineageAnomaly {
    /// A version had no usable lineage tag and was assigned to `assigned_to`.
    UntaggedVersion {
        version_id: VersionId,
        assigned_to: String,
    },
    /// The host head flags were inconsistent; the fallback head was used.
    HeadFallback {
        lineage: String,
        head: VersionId,
        resolution: HeadResolution,
    },
    /// The same version id was listed more than once.
    DuplicateVersion { version_id: VersionId },
}

/// All versions of one item sharing a lineage tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub tag: String,
    /// Ordered descending by sequence (newest first). Never empty.
    pub versions: Vec<VersionMeta>,
    pub head: VersionId,
    pub head_resolution: HeadResolution,
}

impl Lineage {
    pub fn is_head(&self, id: VersionId) -> bool {
        self.head == id
    }

    pub fn contains(&self, id: VersionId) -> bool {
        self.versions.iter().any(|v| v.id == id)
    }

    /// Versions other than the head, newest first.
    pub fn non_head(&self) -> impl Iterator<Item = &VersionMeta> {
        self.versions.iter().filter(move |v| v.id != self.head)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
