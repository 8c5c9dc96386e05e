// Graph schema — table creation and migrations.
//
// A `schema_version` table tracks which migrations have run; each migration
// is a function that executes its SQL once.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per unique identifier seen in any scan.
        -- value is normalized (lowercased, trimmed) before insert.
        CREATE TABLE IF NOT EXISTS entities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_type TEXT NOT NULL,         -- email / phone / url / domain / crypto_wallet / ip / username
            value TEXT NOT NULL,
            report_count INTEGER NOT NULL DEFAULT 0,
            confirmed_scam INTEGER NOT NULL DEFAULT 0,
            first_seen TEXT NOT NULL DEFAULT (datetime('now')),
            last_seen TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(entity_type, value)
        );

        -- Directed edges between entities. Co-occurrence links are written
        -- in both directions so neighbor queries only scan source_id.
        CREATE TABLE IF NOT EXISTS entity_edges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id INTEGER NOT NULL REFERENCES entities(id),
            target_id INTEGER NOT NULL REFERENCES entities(id),
            relationship TEXT NOT NULL,        -- e.g. 'same_scan'
            weight REAL NOT NULL DEFAULT 1.0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(source_id, target_id, relationship)
        );

        -- Cached network risk scores, refreshed on every recomputation
        CREATE TABLE IF NOT EXISTS entity_risk_scores (
            entity_id INTEGER PRIMARY KEY REFERENCES entities(id),
            score REAL NOT NULL,               -- 0.0 to 1.0
            label TEXT NOT NULL,               -- LOW / MEDIUM / HIGH
            degree_connections INTEGER NOT NULL,
            scam_neighbor_count INTEGER NOT NULL,
            second_degree_scams INTEGER NOT NULL,
            computed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for neighbor traversal
        CREATE INDEX IF NOT EXISTS idx_edges_source
            ON entity_edges(source_id);

        -- Index for finding confirmed scams quickly
        CREATE INDEX IF NOT EXISTS idx_entities_scam
            ON entities(confirmed_scam);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, entities, entity_edges, entity_risk_scores = 4 tables
        assert_eq!(count, 4i64);
    }

    #[test]
    fn test_unique_entity_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO entities (entity_type, value) VALUES ('domain', 'example.com')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO entities (entity_type, value) VALUES ('domain', 'example.com')",
            [],
        );
        assert!(dup.is_err());
    }
}
