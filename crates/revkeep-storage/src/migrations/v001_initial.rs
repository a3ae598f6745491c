//! V001: content items, versions, retention policies, work queue.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS content_items (
    id TEXT PRIMARY KEY,
    item_type TEXT NOT NULL,
    primary_lineage TEXT
) STRICT;

-- One row per historical snapshot. Host-owned; the engine only deletes.
CREATE TABLE IF NOT EXISTS versions (
    item_id TEXT NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
    version_id INTEGER NOT NULL,
    sequence INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    lineage_tag TEXT,
    is_current INTEGER NOT NULL DEFAULT 0,
    is_latest_for_lineage INTEGER NOT NULL DEFAULT 0,
    published INTEGER NOT NULL DEFAULT 0,
    labels TEXT NOT NULL DEFAULT '[]',
    PRIMARY KEY (item_id, version_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_versions_item_sequence
    ON versions(item_id, sequence);

CREATE TABLE IF NOT EXISTS retention_policies (
    item_type TEXT NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    enabled INTEGER NOT NULL DEFAULT 1,
    settings TEXT NOT NULL DEFAULT '{}',
    PRIMARY KEY (item_type, name)
) STRICT;

-- Durable at-least-once queue. A claimed row whose claimed_at is older than
-- the claim timeout is handed out again.
CREATE TABLE IF NOT EXISTS work_queue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ready'
        CHECK (status IN ('ready', 'claimed', 'buried')),
    attempts INTEGER NOT NULL DEFAULT 0,
    claim_id TEXT,
    claimed_at INTEGER,
    enqueued_at INTEGER NOT NULL,
    last_error TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_work_queue_status
    ON work_queue(status, id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_work_queue_claim
    ON work_queue(claim_id) WHERE claim_id IS NOT NULL;
"#;
