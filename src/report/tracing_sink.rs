use crate::report::{StepReport, StepSink};

/// Sink that writes step results to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StepSink for TracingSink {
    fn report_step(&self, report: &StepReport) {
        if report.passed {
            tracing::info!(
                step = %report.name,
                duration_ms = report.duration_ms,
                "Step passed: {}",
                report.diagnostic
            );
        } else {
            tracing::error!(
                step = %report.name,
                duration_ms = report.duration_ms,
                "Step failed: {}",
                report.diagnostic
            );
        }
    }

    fn add_execution_error(&self, context: &str, error: &dyn std::error::Error) {
        tracing::warn!("{}: {}", context, error);
    }
}
