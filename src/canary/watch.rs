//! Scheduled runs
//!
//! Runs a canary on a fixed interval. Each run is awaited before the next
//! sleep starts, so runs never overlap.

use crate::canary::controller::Canary;
use crate::canary::outcome::RunResult;
use std::time::Duration;

/// Tally of a watch session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub runs: u64,
    pub passed: u64,
    pub failed: u64,
}

impl WatchSummary {
    fn record(&mut self, result: &RunResult) {
        self.runs += 1;
        if result.is_ok() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Runs `canary` every `interval` until `max_runs` is reached or Ctrl-C
///
/// A failed run is logged and the loop carries on; alarming on failures is
/// the job of whatever consumes the step reports.
pub async fn watch(canary: &mut Canary, interval: Duration, max_runs: Option<u64>) -> WatchSummary {
    let mut summary = WatchSummary::default();

    loop {
        let result = canary.run().await;
        summary.record(&result);

        if let Err(failure) = &result {
            tracing::warn!(
                run = summary.runs,
                kind = %failure.kind(),
                "Canary run failed"
            );
        }

        if max_runs.is_some_and(|max| summary.runs >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping after {} runs", summary.runs);
                break;
            }
        }
    }

    tracing::info!(
        "Watch finished: {} runs, {} passed, {} failed",
        summary.runs,
        summary.passed,
        summary.failed
    );
    summary
}
