//! Step execution
//!
//! A step wraps exactly one attempt under a name and reports how it went.
//! There is no retry.

use crate::canary::outcome::RunResult;
use crate::report::{StepReport, StepSink};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Instant;

/// An open step: created when the attempt starts, consumed when it ends
#[derive(Debug)]
pub struct StepRecord {
    name: String,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl StepRecord {
    pub fn open(name: &str) -> Self {
        Self {
            name: name.to_string(),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Closes the step; a record can only be finished once
    pub fn finish(self, passed: bool, diagnostic: String) -> StepReport {
        StepReport {
            name: self.name,
            passed,
            diagnostic,
            started_at: self.started_at,
            duration_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

/// Runs `attempt` as the step `name` and reports it to `sink`
///
/// The sink sees exactly one report per call. The attempt's result is
/// returned unchanged, so a failed step also fails the caller.
pub async fn run_step<F>(name: &str, sink: &dyn StepSink, attempt: F) -> RunResult
where
    F: Future<Output = RunResult>,
{
    let record = StepRecord::open(name);
    tracing::info!("Executing step: {}", record.name());

    let result = attempt.await;

    let report = match &result {
        Ok(outcome) => record.finish(true, outcome.message()),
        Err(failure) => record.finish(false, failure.to_string()),
    };
    sink.report_step(&report);

    result
}
