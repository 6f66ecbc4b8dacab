//! Run-history schema
//!
//! This module contains the SQL schema for the Canary-Runner history database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per reported step
CREATE TABLE IF NOT EXISTS steps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    passed INTEGER NOT NULL,
    diagnostic TEXT NOT NULL,
    started_at TEXT NOT NULL,
    duration_ms INTEGER NOT NULL,
    -- SHA-256 of the configuration file in effect, when one was loaded
    config_hash TEXT
);

CREATE INDEX IF NOT EXISTS idx_steps_name ON steps(name);

-- Non-fatal problems seen while running
CREATE TABLE IF NOT EXISTS execution_errors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    context TEXT NOT NULL,
    message TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
