//! SQL schema for the Touchline SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout; future migrations will be gated on that number.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per key. Values are opaque JSON documents written by the session
-- layer; the store never looks inside them.
CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC
) WITHOUT ROWID;

PRAGMA user_version = 1;
";
