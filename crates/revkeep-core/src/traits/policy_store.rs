use crate::errors::RevkeepResult;
use crate::models::PolicyConfig;

/// Source of policy configuration. Read fresh on every run.
pub trait IPolicyStore: Send + Sync {
    /// Enabled policies for an item type, in any order.
    fn list_enabled_policies(&self, item_type: &str) -> RevkeepResult<Vec<PolicyConfig>>;
}
