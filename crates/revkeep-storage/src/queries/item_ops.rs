//! Content items and their versions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use revkeep_core::errors::StorageError;
use revkeep_core::models::{ContentItemMeta, VersionId, VersionMeta};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::to_storage_err;

/// Insert or replace an item's metadata.
pub fn upsert_item(conn: &Connection, item: &ContentItemMeta) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO content_items (id, item_type, primary_lineage) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             item_type = excluded.item_type,
             primary_lineage = excluded.primary_lineage",
        params![item.id, item.item_type, item.primary_lineage],
    )
    .map_err(|e| to_storage_err(format!("upsert_item: {e}")))?;
    Ok(())
}

pub fn get_item(conn: &Connection, id: &str) -> Result<Option<ContentItemMeta>, StorageError> {
    conn.query_row(
        "SELECT id, item_type, primary_lineage FROM content_items WHERE id = ?1",
        params![id],
        |row| {
            Ok(ContentItemMeta {
                id: row.get(0)?,
                item_type: row.get(1)?,
                primary_lineage: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(format!("get_item: {e}")))
}

/// Remove an item; its versions go with it.
pub fn delete_item(conn: &Connection, id: &str) -> Result<bool, StorageError> {
    let n = conn
        .execute("DELETE FROM content_items WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(format!("delete_item: {e}")))?;
    Ok(n > 0)
}

/// Insert or replace one version row.
pub fn upsert_version(
    conn: &Connection,
    item_id: &str,
    version: &VersionMeta,
) -> Result<(), StorageError> {
    let labels =
        serde_json::to_string(&version.labels).map_err(|e| to_storage_err(e.to_string()))?;
    let version_id = to_sql_int(version.id.0)?;
    let sequence = to_sql_int(version.sequence)?;
    conn.execute(
        "INSERT OR REPLACE INTO versions
             (item_id, version_id, sequence, created_at, lineage_tag,
              is_current, is_latest_for_lineage, published, labels)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            item_id,
            version_id,
            sequence,
            version.created_at.to_rfc3339(),
            version.lineage_tag,
            version.is_current,
            version.is_latest_for_lineage,
            version.published,
            labels,
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert_version: {e}")))?;
    Ok(())
}

/// Every version of an item, by ascending sequence.
pub fn list_versions(conn: &Connection, item_id: &str) -> Result<Vec<VersionMeta>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT version_id, sequence, created_at, lineage_tag,
                    is_current, is_latest_for_lineage, published, labels
             FROM versions WHERE item_id = ?1
             ORDER BY sequence, version_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![item_id], |row| Ok(row_to_version(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut versions = Vec::new();
    for row in rows {
        versions.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(versions)
}

/// Delete one version. Returns whether a row was removed.
pub fn delete_version(
    conn: &Connection,
    item_id: &str,
    version_id: VersionId,
) -> Result<bool, StorageError> {
    let n = conn
        .execute(
            "DELETE FROM versions WHERE item_id = ?1 AND version_id = ?2",
            params![item_id, to_sql_int(version_id.0)?],
        )
        .map_err(|e| to_storage_err(format!("delete_version: {e}")))?;
    Ok(n > 0)
}

fn row_to_version(row: &Row<'_>) -> Result<VersionMeta, StorageError> {
    let malformed = |details: String| StorageError::MalformedRow {
        table: "versions".to_string(),
        details,
    };
    let get_err = |e: rusqlite::Error| malformed(e.to_string());

    let created_at: String = row.get(2).map_err(get_err)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| malformed(format!("created_at '{created_at}': {e}")))?
        .with_timezone(&Utc);

    let labels: String = row.get(7).map_err(get_err)?;
    let labels: BTreeSet<String> = serde_json::from_str(&labels)
        .map_err(|e| malformed(format!("labels '{labels}': {e}")))?;

    let id: i64 = row.get(0).map_err(get_err)?;
    let sequence: i64 = row.get(1).map_err(get_err)?;
    let unsigned = |field: &str, v: i64| {
        u64::try_from(v).map_err(|_| malformed(format!("negative {field}: {v}")))
    };

    Ok(VersionMeta {
        id: VersionId(unsigned("version_id", id)?),
        sequence: unsigned("sequence", sequence)?,
        created_at,
        lineage_tag: row.get(3).map_err(get_err)?,
        is_current: row.get(4).map_err(get_err)?,
        is_latest_for_lineage: row.get(5).map_err(get_err)?,
        published: row.get(6).map_err(get_err)?,
        labels,
    })
}

/// SQLite integers are signed 64-bit.
fn to_sql_int(v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| to_storage_err(format!("{v} does not fit a SQLite integer")))
}
