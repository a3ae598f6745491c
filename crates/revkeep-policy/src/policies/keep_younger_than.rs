//! Retain anything younger than a duration; allow everything older.

use revkeep_core::errors::{PolicyError, RevkeepResult};
use revkeep_core::models::{EvaluationContext, Lineage, PolicyConfig, Verdict, VerdictMap};
use revkeep_core::traits::IRetentionPolicy;
use serde::Deserialize;

use super::age_cutoff;
use crate::settings::{invalid, parse_settings};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    max_age_days: u32,
}

/// `Allow` for versions created strictly before `now - max_age_days`.
#[derive(Debug, Clone)]
pub struct KeepYoungerThanPolicy {
    name: String,
    max_age_days: u32,
}

impl KeepYoungerThanPolicy {
    pub const KIND: &'static str = "keep_younger_than";

    pub fn new(name: impl Into<String>, max_age_days: u32) -> Self {
        Self {
            name: name.into(),
            max_age_days,
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let settings: Settings = parse_settings(config)?;
        if settings.max_age_days == 0 {
            return Err(invalid(config, "max_age_days must be greater than 0"));
        }
        Ok(Self::new(config.name.clone(), settings.max_age_days))
    }
}

impl IRetentionPolicy for KeepYoungerThanPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn evaluate(&self, lineage: &Lineage, ctx: &EvaluationContext) -> RevkeepResult<VerdictMap> {
        let cutoff = age_cutoff(ctx.now, self.max_age_days);
        Ok(lineage
            .non_head()
            .filter(|v| v.created_at < cutoff)
            .map(|v| (v.id, Verdict::Allow))
            .collect())
    }
}
