//! Connection setup.

pub mod pragmas;

use std::path::Path;

use revkeep_core::errors::StorageError;
use rusqlite::Connection;

use self::pragmas::apply_pragmas;
use crate::{migrations, to_storage_err};

/// Open a database file, apply pragmas, and run pending migrations.
pub fn open(path: &Path, busy_timeout_ms: u32) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)
        .map_err(|e| to_storage_err(format!("open {}: {e}", path.display())))?;
    prepare(conn, busy_timeout_ms)
}

/// Open a private in-memory database (for testing).
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
    prepare(conn, revkeep_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS)
}

fn prepare(conn: Connection, busy_timeout_ms: u32) -> Result<Connection, StorageError> {
    apply_pragmas(&conn, busy_timeout_ms)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
