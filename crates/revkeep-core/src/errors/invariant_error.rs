use crate::models::VersionId;

/// Violations of engine invariants. These indicate a logic defect rather than
/// a transient condition and are never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum InvariantError {
    #[error("refusing to delete head version {version_id} of lineage '{lineage}' on item {item_id}")]
    HeadDeletion {
        item_id: String,
        lineage: String,
        version_id: VersionId,
    },

    #[error("lineage '{lineage}' on item {item_id} has no head version")]
    MissingHead { item_id: String, lineage: String },
}
