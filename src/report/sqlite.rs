//! SQLite run history
//!
//! Persists every reported step so that pass rates can be read back across
//! many scheduled runs.

use crate::report::schema::initialize_schema;
use crate::report::{ReportError, ReportResult, StepReport, StepSink};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// A step row read back from the history database
#[derive(Debug, Clone, PartialEq)]
pub struct StoredStep {
    pub id: i64,
    pub name: String,
    pub passed: bool,
    pub diagnostic: String,
    pub started_at: String,
    pub duration_ms: i64,
    pub config_hash: Option<String>,
}

/// SQLite-backed step sink
pub struct SqliteHistory {
    conn: Mutex<Connection>,
    config_hash: Option<String>,
}

impl SqliteHistory {
    /// Opens (or creates) a history database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> ReportResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            config_hash: None,
        })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> ReportResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            config_hash: None,
        })
    }

    /// Tags every step recorded from now on with a configuration hash
    ///
    /// See `config::compute_config_hash`.
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    fn conn(&self) -> ReportResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ReportError::Poisoned)
    }

    /// Inserts a step row and returns its ID
    pub fn record_step(&self, report: &StepReport) -> ReportResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO steps (name, passed, diagnostic, started_at, duration_ms, config_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                report.name,
                report.passed,
                report.diagnostic,
                report.started_at.to_rfc3339(),
                report.duration_ms as i64,
                self.config_hash
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Inserts an execution-error row
    pub fn record_execution_error(&self, context: &str, message: &str) -> ReportResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO execution_errors (context, message, recorded_at) VALUES (?1, ?2, ?3)",
            params![context, message, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Returns the most recent steps, newest first
    pub fn recent_steps(&self, limit: u32) -> ReportResult<Vec<StoredStep>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, passed, diagnostic, started_at, duration_ms, config_hash
             FROM steps ORDER BY id DESC LIMIT ?1",
        )?;

        let steps = stmt
            .query_map(params![limit], |row| {
                Ok(StoredStep {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    passed: row.get(2)?,
                    diagnostic: row.get(3)?,
                    started_at: row.get(4)?,
                    duration_ms: row.get(5)?,
                    config_hash: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(steps)
    }

    /// Fraction of passed steps for `name`, or `None` if it never ran
    pub fn pass_rate(&self, name: &str) -> ReportResult<Option<f64>> {
        let conn = self.conn()?;
        let (total, passed): (i64, Option<i64>) = conn.query_row(
            "SELECT COUNT(*), SUM(passed) FROM steps WHERE name = ?1",
            params![name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        if total == 0 {
            return Ok(None);
        }
        Ok(Some(passed.unwrap_or(0) as f64 / total as f64))
    }

    /// Number of recorded execution errors
    pub fn count_execution_errors(&self) -> ReportResult<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM execution_errors", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}

impl StepSink for SqliteHistory {
    fn report_step(&self, report: &StepReport) {
        if let Err(e) = self.record_step(report) {
            tracing::error!("Failed to record step {}: {}", report.name, e);
        }
    }

    fn add_execution_error(&self, context: &str, error: &dyn std::error::Error) {
        if let Err(e) = self.record_execution_error(context, &error.to_string()) {
            tracing::error!("Failed to record execution error: {}", e);
        }
    }
}
