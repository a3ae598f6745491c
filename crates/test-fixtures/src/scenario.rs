//! Golden retention scenarios stored under `golden/`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use revkeep_core::models::{ContentItemMeta, Decision, PolicyConfig, VersionMeta};
use serde::Deserialize;

/// One end-to-end scenario: inputs plus the frozen expected decisions.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Clock handed to policies.
    pub now: DateTime<Utc>,
    pub item: ContentItemMeta,
    pub versions: Vec<VersionMeta>,
    pub policies: Vec<PolicyConfig>,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedOutcome {
    /// Lineage tag -> version id -> decision.
    pub decisions: BTreeMap<String, BTreeMap<u64, Decision>>,
    /// Lineage tag -> head version id.
    #[serde(default)]
    pub heads: BTreeMap<String, u64>,
    /// Number of anomalies the lineage builder should report.
    #[serde(default)]
    pub anomalies: usize,
}

impl ExpectedOutcome {
    /// Ids expected to be deleted, ascending.
    pub fn deleted_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .decisions
            .values()
            .flat_map(|m| m.iter())
            .filter(|(_, d)| **d == Decision::Delete)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Load every scenario under `golden/`.
pub fn load_all() -> Vec<GoldenScenario> {
    crate::list_fixtures("golden")
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            crate::load_fixture(&format!("golden/{name}"))
        })
        .collect()
}
