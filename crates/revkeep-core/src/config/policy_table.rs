//! Static policy store backed by the `[[policies]]` table of the config file.

use serde::{Deserialize, Serialize};

use crate::errors::RevkeepResult;
use crate::models::PolicyConfig;
use crate::traits::IPolicyStore;

/// Item type that matches every item.
pub const ANY_ITEM_TYPE: &str = "*";

/// One `[[policies]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub name: String,
    /// Item type the policy applies to, or `"*"` for all.
    pub item_type: String,
    pub kind: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl PolicyEntry {
    pub fn applies_to(&self, item_type: &str) -> bool {
        self.item_type == ANY_ITEM_TYPE || self.item_type == item_type
    }

    pub fn to_policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            name: self.name.clone(),
            kind: self.kind.clone(),
            enabled: self.enabled,
            settings: self.settings.clone(),
        }
    }
}

/// `IPolicyStore` over a fixed list of entries.
#[derive(Debug, Clone, Default)]
pub struct ConfigPolicyStore {
    entries: Vec<PolicyEntry>,
}

impl ConfigPolicyStore {
    pub fn new(entries: Vec<PolicyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }
}

impl IPolicyStore for ConfigPolicyStore {
    fn list_enabled_policies(&self, item_type: &str) -> RevkeepResult<Vec<PolicyConfig>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.enabled && e.applies_to(item_type))
            .map(PolicyEntry::to_policy_config)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, item_type: &str, enabled: bool) -> PolicyEntry {
        PolicyEntry {
            name: name.to_string(),
            item_type: item_type.to_string(),
            kind: "keep_newest".to_string(),
            enabled,
            settings: serde_json::json!({ "count": 3 }),
        }
    }

    #[test]
    fn filters_by_item_type_and_enabled() {
        let store = ConfigPolicyStore::new(vec![
            entry("a", "article", true),
            entry("b", "page", true),
            entry("c", "*", true),
            entry("d", "article", false),
        ]);
        let names: Vec<String> = store
            .list_enabled_policies("article")
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn unknown_item_type_only_gets_wildcards() {
        let store = ConfigPolicyStore::new(vec![entry("a", "article", true), entry("c", "*", true)]);
        let policies = store.list_enabled_policies("event").unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].name, "c");
    }
}
