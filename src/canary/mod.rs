//! Canary module: one navigation, one classified outcome
//!
//! This module contains the core of the runner:
//! - Outcome definitions and diagnostics
//! - The outcome classifier
//! - The step executor
//! - The controller that ties them to a driver and a sink
//! - A scheduler loop for periodic runs

mod classify;
mod controller;
mod outcome;
mod state;
mod step;
mod watch;

pub use classify::{classify, is_success_status, SUCCESS_STATUS};
pub use controller::{Canary, CanaryConfig};
pub use outcome::{outcome_kind, CanaryFailure, Outcome, OutcomeKind, RunResult};
pub use state::RunState;
pub use step::{run_step, StepRecord};
pub use watch::{watch, WatchSummary};
