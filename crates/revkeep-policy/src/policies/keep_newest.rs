//! Retain the newest N versions of a lineage; allow deletion of the rest.

use revkeep_core::errors::{PolicyError, RevkeepResult};
use revkeep_core::models::{EvaluationContext, Lineage, PolicyConfig, Verdict, VerdictMap};
use revkeep_core::traits::IRetentionPolicy;
use serde::Deserialize;

use crate::settings::{invalid, parse_settings};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    count: usize,
}

/// Keeps the head plus the `count - 1` newest other versions out of reach;
/// every older version gets `Allow`. Versions inside the window abstain.
#[derive(Debug, Clone)]
pub struct KeepNewestPolicy {
    name: String,
    count: usize,
}

impl KeepNewestPolicy {
    pub const KIND: &'static str = "keep_newest";

    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let settings: Settings = parse_settings(config)?;
        if settings.count == 0 {
            return Err(invalid(config, "count must be at least 1 (the head)"));
        }
        Ok(Self::new(config.name.clone(), settings.count))
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl IRetentionPolicy for KeepNewestPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn evaluate(&self, lineage: &Lineage, _ctx: &EvaluationContext) -> RevkeepResult<VerdictMap> {
        // The head always occupies one slot of the window.
        let window = self.count.saturating_sub(1);
        Ok(lineage
            .non_head()
            .skip(window)
            .map(|v| (v.id, Verdict::Allow))
            .collect())
    }
}
