//! SqliteStore: the three collaborator traits over one SQLite database.

use std::sync::Mutex;

use chrono::Utc;
use revkeep_core::config::StorageConfig;
use revkeep_core::errors::{QueueError, RevkeepResult, StorageError};
use revkeep_core::models::{ContentItemMeta, PolicyConfig, VersionId, VersionMeta, WorkItem};
use revkeep_core::traits::{IPolicyStore, IVersionStorage, IWorkQueue};
use rusqlite::Connection;

use crate::connection;
use crate::queries::{item_ops, policy_ops, queue_ops};

/// Owns the single write connection. All access is serialized.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    claim_timeout_secs: i64,
}

impl SqliteStore {
    /// Open (and migrate) the database described by `config`.
    pub fn open(config: &StorageConfig) -> RevkeepResult<Self> {
        let conn = connection::open(&config.db_path, config.busy_timeout_ms)?;
        tracing::info!(path = %config.db_path.display(), "opened retention store");
        Ok(Self {
            conn: Mutex::new(conn),
            claim_timeout_secs: claim_timeout(config.claim_timeout_secs),
        })
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> RevkeepResult<Self> {
        let conn = connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            claim_timeout_secs: claim_timeout(
                revkeep_core::config::defaults::DEFAULT_CLAIM_TIMEOUT_SECS,
            ),
        })
    }

    pub fn with_claim_timeout_secs(mut self, secs: u64) -> Self {
        self.claim_timeout_secs = claim_timeout(secs);
        self
    }

    /// Run `f` with the serialized connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    // Host-side seeding. The engine itself never writes items or versions.

    pub fn insert_item(&self, item: &ContentItemMeta) -> RevkeepResult<()> {
        Ok(self.with_conn(|c| item_ops::upsert_item(c, item))?)
    }

    pub fn insert_version(&self, item_id: &str, version: &VersionMeta) -> RevkeepResult<()> {
        Ok(self.with_conn(|c| item_ops::upsert_version(c, item_id, version))?)
    }

    /// Remove an item and all of its versions.
    pub fn remove_item(&self, item_id: &str) -> RevkeepResult<bool> {
        Ok(self.with_conn(|c| item_ops::delete_item(c, item_id))?)
    }

    pub fn upsert_policy(&self, item_type: &str, policy: &PolicyConfig) -> RevkeepResult<()> {
        Ok(self.with_conn(|c| policy_ops::upsert_policy(c, item_type, policy))?)
    }

    pub fn remove_policy(&self, item_type: &str, name: &str) -> RevkeepResult<bool> {
        Ok(self.with_conn(|c| policy_ops::delete_policy(c, item_type, name))?)
    }

    /// `(item_id, reason)` of every buried delivery.
    pub fn buried(&self) -> RevkeepResult<Vec<(String, String)>> {
        self.with_conn(queue_ops::list_buried).map_err(queue_err)
    }

    /// Deliveries currently claimed.
    pub fn in_flight(&self) -> RevkeepResult<usize> {
        self.with_conn(|c| queue_ops::count_by_status(c, "claimed"))
            .map_err(queue_err)
    }
}

fn claim_timeout(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX)
}

fn queue_err(e: StorageError) -> revkeep_core::errors::RevkeepError {
    QueueError::Backend {
        message: e.to_string(),
    }
    .into()
}

fn unknown_claim(item: &WorkItem) -> revkeep_core::errors::RevkeepError {
    QueueError::UnknownClaim {
        claim_id: item.claim_id.clone(),
    }
    .into()
}

impl IVersionStorage for SqliteStore {
    fn describe_item(&self, item_id: &str) -> RevkeepResult<Option<ContentItemMeta>> {
        Ok(self.with_conn(|c| item_ops::get_item(c, item_id))?)
    }

    fn list_versions(&self, item_id: &str) -> RevkeepResult<Vec<VersionMeta>> {
        self.with_conn(|c| item_ops::list_versions(c, item_id))
            .map_err(|e| match e {
                StorageError::MalformedRow { .. } => e.into(),
                other => StorageError::ListFailed {
                    item_id: item_id.to_string(),
                    reason: other.to_string(),
                }
                .into(),
            })
    }

    fn delete_version(&self, item_id: &str, version_id: VersionId) -> RevkeepResult<()> {
        let removed = self
            .with_conn(|c| item_ops::delete_version(c, item_id, version_id))
            .map_err(|e| StorageError::DeleteFailed {
                item_id: item_id.to_string(),
                version_id,
                reason: e.to_string(),
            })?;
        if !removed {
            tracing::debug!(item_id, version_id = version_id.0, "version already gone");
        }
        Ok(())
    }
}

impl IPolicyStore for SqliteStore {
    fn list_enabled_policies(&self, item_type: &str) -> RevkeepResult<Vec<PolicyConfig>> {
        Ok(self.with_conn(|c| policy_ops::list_enabled(c, item_type))?)
    }
}

impl IWorkQueue for SqliteStore {
    fn enqueue(&self, item_id: &str) -> RevkeepResult<()> {
        let now = Utc::now().timestamp();
        self.with_conn(|c| queue_ops::enqueue(c, item_id, now))
            .map_err(queue_err)
    }

    fn claim(&self) -> RevkeepResult<Option<WorkItem>> {
        let now = Utc::now().timestamp();
        let cutoff = now.saturating_sub(self.claim_timeout_secs);
        let claim_id = uuid::Uuid::new_v4().to_string();
        self.with_conn(|c| queue_ops::claim(c, &claim_id, now, cutoff))
            .map_err(queue_err)
    }

    fn ack(&self, item: &WorkItem) -> RevkeepResult<()> {
        let found = self
            .with_conn(|c| queue_ops::ack(c, &item.claim_id))
            .map_err(queue_err)?;
        if found {
            Ok(())
        } else {
            Err(unknown_claim(item))
        }
    }

    fn release(&self, item: &WorkItem) -> RevkeepResult<()> {
        let found = self
            .with_conn(|c| queue_ops::release(c, &item.claim_id))
            .map_err(queue_err)?;
        if found {
            Ok(())
        } else {
            Err(unknown_claim(item))
        }
    }

    fn bury(&self, item: &WorkItem, reason: &str) -> RevkeepResult<()> {
        let found = self
            .with_conn(|c| queue_ops::bury(c, &item.claim_id, reason))
            .map_err(queue_err)?;
        if found {
            Ok(())
        } else {
            Err(unknown_claim(item))
        }
    }

    fn depth(&self) -> RevkeepResult<usize> {
        self.with_conn(|c| queue_ops::count_by_status(c, "ready"))
            .map_err(queue_err)
    }
}
