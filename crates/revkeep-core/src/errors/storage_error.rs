use crate::models::VersionId;

/// Errors raised by a version storage provider.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("failed to list versions of item {item_id}: {reason}")]
    ListFailed { item_id: String, reason: String },

    #[error("failed to delete version {version_id} of item {item_id}: {reason}")]
    DeleteFailed {
        item_id: String,
        version_id: VersionId,
        reason: String,
    },

    #[error("malformed row in {table}: {details}")]
    MalformedRow { table: String, details: String },
}
