//! Step reporting
//!
//! Every validated canary run reports exactly one step. Sinks decide what
//! happens to it: logging, persisting to a run-history database, or both.
//!
//! # Components
//!
//! - `StepSink`: the trait a host implements to receive step results
//! - `TracingSink`: emits step results as structured log events
//! - `SqliteHistory`: persists steps and execution errors for `history`
//! - `FanoutSink`: forwards to several sinks in order

mod fanout;
mod schema;
mod sqlite;
mod tracing_sink;

pub use fanout::FanoutSink;
pub use sqlite::{SqliteHistory, StoredStep};
pub use tracing_sink::TracingSink;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while persisting reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("History database lock poisoned")]
    Poisoned,
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// The finalized result of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Step name (the target's hostname)
    pub name: String,

    /// Whether the step passed
    pub passed: bool,

    /// Success message or failure diagnostic
    pub diagnostic: String,

    /// When the step started
    pub started_at: DateTime<Utc>,

    /// How long the step took
    pub duration_ms: u64,
}

/// Receiver for step results and non-fatal execution errors
///
/// Sinks must not fail the run: an implementation that cannot record
/// something logs the problem and returns.
pub trait StepSink: Send + Sync {
    /// Records the result of one step
    fn report_step(&self, report: &StepReport);

    /// Records an error that did not abort the run
    fn add_execution_error(&self, context: &str, error: &dyn std::error::Error);
}
