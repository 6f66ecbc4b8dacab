use crate::report::{StepReport, StepSink};
use std::sync::Arc;

/// Forwards every call to each inner sink, in insertion order
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn StepSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink, builder style
    pub fn with(mut self, sink: Arc<dyn StepSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl StepSink for FanoutSink {
    fn report_step(&self, report: &StepReport) {
        for sink in &self.sinks {
            sink.report_step(report);
        }
    }

    fn add_execution_error(&self, context: &str, error: &dyn std::error::Error) {
        for sink in &self.sinks {
            sink.add_execution_error(context, error);
        }
    }
}
