//! Retention policy configuration rows.

use revkeep_core::errors::StorageError;
use revkeep_core::models::PolicyConfig;
use rusqlite::{params, Connection};

use crate::to_storage_err;

pub fn upsert_policy(
    conn: &Connection,
    item_type: &str,
    policy: &PolicyConfig,
) -> Result<(), StorageError> {
    let settings =
        serde_json::to_string(&policy.settings).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO retention_policies (item_type, name, kind, enabled, settings)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(item_type, name) DO UPDATE SET
             kind = excluded.kind,
             enabled = excluded.enabled,
             settings = excluded.settings",
        params![item_type, policy.name, policy.kind, policy.enabled, settings],
    )
    .map_err(|e| to_storage_err(format!("upsert_policy: {e}")))?;
    Ok(())
}

pub fn delete_policy(conn: &Connection, item_type: &str, name: &str) -> Result<bool, StorageError> {
    let n = conn
        .execute(
            "DELETE FROM retention_policies WHERE item_type = ?1 AND name = ?2",
            params![item_type, name],
        )
        .map_err(|e| to_storage_err(format!("delete_policy: {e}")))?;
    Ok(n > 0)
}

/// Enabled policies for an item type, by name.
pub fn list_enabled(conn: &Connection, item_type: &str) -> Result<Vec<PolicyConfig>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, kind, settings FROM retention_policies
             WHERE item_type = ?1 AND enabled = 1
             ORDER BY name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![item_type], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut policies = Vec::new();
    for row in rows {
        let (name, kind, settings) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let settings = serde_json::from_str(&settings).map_err(|e| StorageError::MalformedRow {
            table: "retention_policies".to_string(),
            details: format!("settings of '{name}': {e}"),
        })?;
        policies.push(PolicyConfig {
            name,
            kind,
            enabled: true,
            settings,
        });
    }
    Ok(policies)
}
