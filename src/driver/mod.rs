//! Page driver capability
//!
//! The canary never talks to the network directly. It asks a `PageDriver`
//! to navigate and gets back either a navigation result, no result at all,
//! or an error. This module defines that seam and ships an HTTP-only driver
//! built on `reqwest`; tests substitute scripted drivers.

mod http;

pub use http::HttpDriver;

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default navigation timeout
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Blank document used when resetting a page between runs
pub const BLANK_PAGE: &str = "about:blank";

/// Lifecycle point at which a navigation counts as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaitUntil {
    /// Response headers received
    Commit,
    /// Document delivered (the body has been read)
    #[default]
    DomContentLoaded,
    /// Document and everything it loads delivered
    Load,
}

/// Options for a single navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl NavigateOptions {
    /// Options with the default wait condition and the given timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            wait_until: WaitUntil::DomContentLoaded,
            timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

/// What a completed navigation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationResult {
    /// HTTP status code of the main document
    pub status: u16,
    /// Reason phrase for the status (may be empty)
    pub status_text: String,
    /// URL of the document after redirects, when known
    pub final_url: Option<String>,
}

impl NavigationResult {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            final_url: None,
        }
    }
}

/// Errors raised by a driver while navigating
///
/// Implementations keep the navigated URL out of the text, since it may
/// carry credentials.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Navigation timeout of {timeout_ms} ms exceeded")]
    Timeout { timeout_ms: u128 },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Navigation failed: {0}")]
    Request(String),

    #[error("Unsupported navigation target: {0}")]
    Unsupported(String),
}

/// A capability that performs real navigations
///
/// `Ok(None)` means the navigation completed without producing a document
/// response, which the canary treats differently from an error.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates to `url`, waiting as described by `options`
    async fn navigate(
        &self,
        url: &str,
        options: &NavigateOptions,
    ) -> Result<Option<NavigationResult>, DriverError>;

    /// Returns the page to a blank document
    async fn reset(&self) -> Result<(), DriverError>;
}
