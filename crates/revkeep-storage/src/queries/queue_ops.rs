//! Durable work queue rows.
//!
//! Status moves `ready -> claimed -> (deleted | ready | buried)`. A claim
//! older than the timeout is treated as abandoned and becomes ready again.

use revkeep_core::errors::StorageError;
use revkeep_core::models::WorkItem;
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

pub fn enqueue(conn: &Connection, item_id: &str, now: i64) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO work_queue (item_id, status, enqueued_at) VALUES (?1, 'ready', ?2)",
        params![item_id, now],
    )
    .map_err(|e| to_storage_err(format!("enqueue: {e}")))?;
    Ok(())
}

/// Return abandoned claims to `ready`. Returns how many were reclaimed.
pub fn reclaim_expired(conn: &Connection, cutoff: i64) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE work_queue SET status = 'ready', claim_id = NULL, claimed_at = NULL
         WHERE status = 'claimed' AND claimed_at <= ?1",
        params![cutoff],
    )
    .map_err(|e| to_storage_err(format!("reclaim_expired: {e}")))
}

/// Claim the oldest ready row, in one transaction.
pub fn claim(
    conn: &Connection,
    claim_id: &str,
    now: i64,
    cutoff: i64,
) -> Result<Option<WorkItem>, StorageError> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("claim begin: {e}")))?;

    let reclaimed = reclaim_expired(&tx, cutoff)?;
    if reclaimed > 0 {
        tracing::warn!(reclaimed, "abandoned claims returned to the queue");
    }

    let next: Option<(i64, String, u32)> = tx
        .query_row(
            "SELECT id, item_id, attempts FROM work_queue
             WHERE status = 'ready' ORDER BY id LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(format!("claim select: {e}")))?;

    let Some((row_id, item_id, attempts)) = next else {
        tx.commit()
            .map_err(|e| to_storage_err(format!("claim commit: {e}")))?;
        return Ok(None);
    };

    let attempts = attempts + 1;
    tx.execute(
        "UPDATE work_queue
         SET status = 'claimed', claim_id = ?1, claimed_at = ?2, attempts = ?3
         WHERE id = ?4",
        params![claim_id, now, attempts, row_id],
    )
    .map_err(|e| to_storage_err(format!("claim update: {e}")))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("claim commit: {e}")))?;

    Ok(Some(WorkItem {
        claim_id: claim_id.to_string(),
        item_id,
        attempts,
    }))
}

/// Remove a claimed row. Returns false when the claim is unknown.
pub fn ack(conn: &Connection, claim_id: &str) -> Result<bool, StorageError> {
    let n = conn
        .execute(
            "DELETE FROM work_queue WHERE claim_id = ?1 AND status = 'claimed'",
            params![claim_id],
        )
        .map_err(|e| to_storage_err(format!("ack: {e}")))?;
    Ok(n > 0)
}

/// Make a claimed row ready again.
pub fn release(conn: &Connection, claim_id: &str) -> Result<bool, StorageError> {
    let n = conn
        .execute(
            "UPDATE work_queue SET status = 'ready', claim_id = NULL, claimed_at = NULL
             WHERE claim_id = ?1 AND status = 'claimed'",
            params![claim_id],
        )
        .map_err(|e| to_storage_err(format!("release: {e}")))?;
    Ok(n > 0)
}

/// Park a claimed row with a reason.
pub fn bury(conn: &Connection, claim_id: &str, reason: &str) -> Result<bool, StorageError> {
    let n = conn
        .execute(
            "UPDATE work_queue
             SET status = 'buried', claim_id = NULL, claimed_at = NULL, last_error = ?2
             WHERE claim_id = ?1 AND status = 'claimed'",
            params![claim_id, reason],
        )
        .map_err(|e| to_storage_err(format!("bury: {e}")))?;
    Ok(n > 0)
}

/// Rows in the given status.
pub fn count_by_status(conn: &Connection, status: &str) -> Result<usize, StorageError> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM work_queue WHERE status = ?1",
            params![status],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(format!("count_by_status: {e}")))?;
    Ok(usize::try_from(n).unwrap_or(0))
}

/// `(item_id, last_error)` of every buried row, oldest first.
pub fn list_buried(conn: &Connection) -> Result<Vec<(String, String)>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT item_id, COALESCE(last_error, '') FROM work_queue
             WHERE status = 'buried' ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
