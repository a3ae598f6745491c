//! Forbid deletion of versions carrying a label, e.g. an editorial hold.

use revkeep_core::errors::{PolicyError, RevkeepResult};
use revkeep_core::models::{EvaluationContext, Lineage, PolicyConfig, Verdict, VerdictMap};
use revkeep_core::traits::IRetentionPolicy;
use serde::Deserialize;

use crate::settings::{invalid, parse_settings};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    label: String,
}

/// `Keep` for versions labelled `label`; abstains on the rest.
#[derive(Debug, Clone)]
pub struct LabelHoldPolicy {
    name: String,
    label: String,
}

impl LabelHoldPolicy {
    pub const KIND: &'static str = "label_hold";

    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let settings: Settings = parse_settings(config)?;
        if settings.label.trim().is_empty() {
            return Err(invalid(config, "label must not be empty"));
        }
        Ok(Self::new(config.name.clone(), settings.label))
    }
}

impl IRetentionPolicy for LabelHoldPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn evaluate(&self, lineage: &Lineage, _ctx: &EvaluationContext) -> RevkeepResult<VerdictMap> {
        Ok(lineage
            .non_head()
            .filter(|v| v.has_label(&self.label))
            .map(|v| (v.id, Verdict::Keep))
            .collect())
    }
}
