//! Canary-Runner: a synthetic endpoint health check
//!
//! This crate navigates once to a configured target URL per invocation,
//! classifies what came back into a small closed set of outcomes, and reports
//! a single named step to pluggable sinks so a host can alarm on it.

pub mod canary;
pub mod config;
pub mod driver;
pub mod notify;
pub mod report;
pub mod url;

use thiserror::Error;

/// Configuration-specific errors
///
/// All of these are fatal: the process cannot start a run with a broken
/// configuration, and no outcome is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing URL environment variable!")]
    MissingTargetUrl,

    #[error("Missing WEBHOOK_URL environment variable!")]
    MissingWebhookUrl,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("{0}")]
    Parse(#[from] ::url::ParseError),

    #[error("URL has no host")]
    MissingHost,
}

// Re-export commonly used types
pub use canary::{Canary, CanaryConfig, CanaryFailure, Outcome, OutcomeKind, RunState};
pub use config::{Config, TargetUrl};
pub use driver::{HttpDriver, NavigationResult, PageDriver};
pub use report::{StepReport, StepSink};
pub use crate::url::{sanitize_url, validate_target};
