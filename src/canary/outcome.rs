//! Outcome definitions for a canary run
//!
//! A run either returns an `Outcome` (the target answered with a 2xx) or a
//! `CanaryFailure`. The failure's `Display` text is the diagnostic that ends
//! up in the step report.
use std::fmt;
use thiserror::Error;

/// The closed set of classifications a run can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// The target could not be parsed as a URL; nothing was navigated
    UrlParseError,

    /// The driver raised while navigating (timeout, DNS, connection)
    NavigationError,

    /// Navigation completed without producing a response
    NoResponse,

    /// The response status was outside 200..=299
    BadStatus,

    /// The response status was inside 200..=299
    Success,
}

impl OutcomeKind {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlParseError => "url_parse_error",
            Self::NavigationError => "navigation_error",
            Self::NoResponse => "no_response",
            Self::BadStatus => "bad_status",
            Self::Success => "success",
        }
    }

    /// Returns all outcome kinds
    pub fn all_kinds() -> Vec<Self> {
        vec![
            Self::UrlParseError,
            Self::NavigationError,
            Self::NoResponse,
            Self::BadStatus,
            Self::Success,
        ]
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Sanitized URL that was checked
    pub url: String,

    /// Response status (always within 200..=299)
    pub status: u16,

    /// Response reason phrase
    pub status_text: String,

    /// Sanitized URL of the document after redirects, when the driver knows it
    pub final_url: Option<String>,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        OutcomeKind::Success
    }

    /// Human-readable description of the response
    pub fn message(&self) -> String {
        format!(
            "Response from url: {}  Status: {}  Status Text: {}",
            self.url, self.status, self.status_text
        )
    }
}

/// A failed run, carrying its diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanaryFailure {
    #[error("Error parsing url: {url}.  {reason}")]
    UrlParse { url: String, reason: String },

    #[error("{message}")]
    Navigation { url: String, message: String },

    #[error("No response returned for url: {url}")]
    NoResponse { url: String },

    #[error("Failed to load url: {url} {status} {status_text}")]
    BadStatus {
        url: String,
        status: u16,
        status_text: String,
    },
}

impl CanaryFailure {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::UrlParse { .. } => OutcomeKind::UrlParseError,
            Self::Navigation { .. } => OutcomeKind::NavigationError,
            Self::NoResponse { .. } => OutcomeKind::NoResponse,
            Self::BadStatus { .. } => OutcomeKind::BadStatus,
        }
    }
}

/// Result of one canary run
pub type RunResult = Result<Outcome, CanaryFailure>;

/// Classification of a run result, success or not
pub fn outcome_kind(result: &RunResult) -> OutcomeKind {
    match result {
        Ok(outcome) => outcome.kind(),
        Err(failure) => failure.kind(),
    }
}
