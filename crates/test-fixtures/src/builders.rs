//! Builders for `VersionMeta` with deterministic timestamps.

use chrono::{DateTime, Duration, TimeZone, Utc};
use revkeep_core::models::{VersionId, VersionMeta};

/// Fixed reference instant: 2024-01-01T00:00:00Z.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Start building a version. Id and sequence both default to `id`, the
/// lineage to `en`, and `created_at` to `base_time() + id days`.
pub fn version(id: u64) -> VersionBuilder {
    VersionBuilder::new(id)
}

#[derive(Debug, Clone)]
pub struct VersionBuilder {
    meta: VersionMeta,
}

impl VersionBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            meta: VersionMeta {
                id: VersionId(id),
                sequence: id,
                created_at: base_time() + Duration::days(id as i64),
                lineage_tag: Some("en".to_string()),
                is_current: false,
                is_latest_for_lineage: false,
                published: false,
                labels: Default::default(),
            },
        }
    }

    pub fn sequence(mut self, sequence: u64) -> Self {
        self.meta.sequence = sequence;
        self
    }

    pub fn lineage(mut self, tag: &str) -> Self {
        self.meta.lineage_tag = Some(tag.to_string());
        self
    }

    pub fn untagged(mut self) -> Self {
        self.meta.lineage_tag = None;
        self
    }

    /// Set both host head flags.
    pub fn head(mut self) -> Self {
        self.meta.is_current = true;
        self.meta.is_latest_for_lineage = true;
        self
    }

    pub fn flags(mut self, is_current: bool, is_latest_for_lineage: bool) -> Self {
        self.meta.is_current = is_current;
        self.meta.is_latest_for_lineage = is_latest_for_lineage;
        self
    }

    pub fn published(mut self) -> Self {
        self.meta.published = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.meta.labels.insert(label.to_string());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.meta.created_at = at;
        self
    }

    /// `created_at = now - days`.
    pub fn age_days(mut self, now: DateTime<Utc>, days: i64) -> Self {
        self.meta.created_at = now - Duration::days(days);
        self
    }

    pub fn build(self) -> VersionMeta {
        self.meta
    }
}

/// Versions `1..=count` of one lineage with the last one flagged as head.
pub fn linear_lineage(tag: &str, ids: std::ops::RangeInclusive<u64>) -> Vec<VersionMeta> {
    let last = *ids.end();
    ids.map(|id| {
        let b = version(id).lineage(tag);
        let b = if id == last { b.head() } else { b };
        b.build()
    })
    .collect()
}
