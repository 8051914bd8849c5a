//! Schema and PRAGMA configuration for the SQLite backend.
//!
//! Two tables: `statements` keyed by text, and `links` recording which
//! statement answered which prompt and how often. Both sides of a link are
//! statement texts, so the response graph stays navigable in either
//! direction.

use rusqlite::Connection;

use banter_core::errors::BanterResult;

use crate::to_storage_err;

/// Apply performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection) -> BanterResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Create the tables and indexes if they do not exist. Safe to run on every
/// open.
pub fn init_schema(conn: &Connection) -> BanterResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS statements (
            text        TEXT PRIMARY KEY,
            extra_data  TEXT NOT NULL DEFAULT '{}',
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS links (
            statement_text TEXT NOT NULL,
            prompt_text    TEXT NOT NULL,
            occurrence     INTEGER NOT NULL DEFAULT 1,
            created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (statement_text, prompt_text),
            FOREIGN KEY (statement_text) REFERENCES statements(text)
        );

        CREATE INDEX IF NOT EXISTS idx_links_statement ON links(statement_text);
        CREATE INDEX IF NOT EXISTS idx_links_prompt ON links(prompt_text);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
