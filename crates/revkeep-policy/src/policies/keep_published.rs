//! Forbid deletion of any version that was published.

use revkeep_core::errors::{PolicyError, RevkeepResult};
use revkeep_core::models::{EvaluationContext, Lineage, PolicyConfig, Verdict, VerdictMap};
use revkeep_core::traits::IRetentionPolicy;
use serde::Deserialize;

use crate::settings::parse_settings;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {}

/// `Keep` for published versions.
#[derive(Debug, Clone)]
pub struct KeepPublishedPolicy {
    name: String,
}

impl KeepPublishedPolicy {
    pub const KIND: &'static str = "keep_published";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let _: Settings = parse_settings(config)?;
        Ok(Self::new(config.name.clone()))
    }
}

impl IRetentionPolicy for KeepPublishedPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn evaluate(&self, lineage: &Lineage, _ctx: &EvaluationContext) -> RevkeepResult<VerdictMap> {
        Ok(lineage
            .non_head()
            .filter(|v| v.published)
            .map(|v| (v.id, Verdict::Keep))
            .collect())
    }
}
