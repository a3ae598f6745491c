use crate::errors::RevkeepResult;
use crate::models::{ContentItemMeta, VersionId, VersionMeta};

/// Host storage holding content items and their versions.
///
/// Implementations must tolerate concurrent calls for different items.
pub trait IVersionStorage: Send + Sync {
    /// Describe an item. `None` when the item no longer exists.
    fn describe_item(&self, item_id: &str) -> RevkeepResult<Option<ContentItemMeta>>;

    /// List every version of an item, in any order. Must reflect earlier deletions.
    fn list_versions(&self, item_id: &str) -> RevkeepResult<Vec<VersionMeta>>;

    /// Permanently delete one version. Deleting an absent version is `Ok`.
    fn delete_version(&self, item_id: &str, version_id: VersionId) -> RevkeepResult<()>;
}
