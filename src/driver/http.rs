//! HTTP page driver
//!
//! Navigates with a plain GET. There is no page state to reset and no
//! sub-resources to wait for, so `Load` and `DomContentLoaded` both mean
//! "the body has been read".

use crate::driver::{DriverError, NavigateOptions, NavigationResult, PageDriver, WaitUntil};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Page driver backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpDriver {
    client: Client,
}

impl HttpDriver {
    /// Builds a driver whose requests identify as `user_agent`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use canary_runner::driver::HttpDriver;
    ///
    /// let driver = HttpDriver::new("canary-runner/1.0.0").unwrap();
    /// ```
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        // Connecting counts against the per-navigation timeout, so the only
        // deadline that can fire is the configured one
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    fn classify_error(err: reqwest::Error, timeout: Duration) -> DriverError {
        if err.is_timeout() {
            return DriverError::Timeout {
                timeout_ms: timeout.as_millis(),
            };
        }

        let connect = err.is_connect();
        let message = err.without_url().to_string();
        if connect {
            DriverError::Connect(message)
        } else {
            DriverError::Request(message)
        }
    }
}

#[async_trait]
impl PageDriver for HttpDriver {
    async fn navigate(
        &self,
        url: &str,
        options: &NavigateOptions,
    ) -> Result<Option<NavigationResult>, DriverError> {
        let parsed = Url::parse(url).map_err(|e| DriverError::Request(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            // Same-document navigations produce no response
            "about" => return Ok(None),
            other => return Err(DriverError::Unsupported(other.to_string())),
        }

        tracing::debug!(
            "GET {} (timeout {:?})",
            parsed.host_str().unwrap_or_default(),
            options.timeout
        );

        let response = self
            .client
            .get(parsed)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| Self::classify_error(e, options.timeout))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if options.wait_until != WaitUntil::Commit {
            response
                .bytes()
                .await
                .map_err(|e| Self::classify_error(e, options.timeout))?;
        }

        Ok(Some(NavigationResult {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            final_url: Some(final_url),
        }))
    }

    async fn reset(&self) -> Result<(), DriverError> {
        Ok(())
    }
}
