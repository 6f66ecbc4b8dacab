//! Canary controller - orchestrates a single run
//!
//! Validation, the navigation step, and classification happen here in that
//! order, once per call to `Canary::run`.

use crate::canary::classify::classify;
use crate::canary::outcome::{outcome_kind, CanaryFailure, RunResult};
use crate::canary::state::RunState;
use crate::canary::step::run_step;
use crate::config::{Config, TargetUrl};
use crate::driver::{NavigateOptions, PageDriver, BLANK_PAGE};
use crate::report::StepSink;
use crate::url::{sanitize_url, validate_target};
use crate::ConfigError;
use std::sync::Arc;
use std::time::Duration;

/// Everything a canary needs to know, fixed for its lifetime
#[derive(Debug, Clone)]
pub struct CanaryConfig {
    /// URL to check
    pub target: TargetUrl,

    /// Options for the navigation
    pub navigation: NavigateOptions,

    /// Reset the page to a blank document before each run
    pub reset_page: bool,

    /// Query parameters redacted in diagnostics
    pub restricted_url_parameters: Vec<String>,
}

impl CanaryConfig {
    /// Default settings for `target`
    pub fn new(target: TargetUrl) -> Self {
        Self {
            target,
            navigation: NavigateOptions::default(),
            reset_page: false,
            restricted_url_parameters: Vec::new(),
        }
    }

    /// Derives the canary settings from a loaded configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CanaryConfig)` - The configuration names a target
    /// * `Err(ConfigError::MissingTargetUrl)` - It does not
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let target = TargetUrl::new(config.canary.target_url.clone())?;
        Ok(Self {
            target,
            navigation: NavigateOptions {
                wait_until: config.canary.wait_until,
                timeout: Duration::from_millis(config.canary.navigation_timeout_ms),
            },
            reset_page: config.canary.reset_page,
            restricted_url_parameters: config.sanitize.restricted_url_parameters.clone(),
        })
    }
}

/// A configured canary with its driver and step sink
pub struct Canary {
    config: CanaryConfig,
    driver: Arc<dyn PageDriver>,
    sink: Arc<dyn StepSink>,
    state: RunState,
    runs: u64,
}

impl Canary {
    /// Creates a canary
    ///
    /// # Arguments
    ///
    /// * `config` - Target and navigation settings
    /// * `driver` - Performs the navigation
    /// * `sink` - Receives the step report and execution errors
    pub fn new(config: CanaryConfig, driver: Arc<dyn PageDriver>, sink: Arc<dyn StepSink>) -> Self {
        Self {
            config,
            driver,
            sink,
            state: RunState::Idle,
            runs: 0,
        }
    }

    pub fn config(&self) -> &CanaryConfig {
        &self.config
    }

    /// State the most recent run ended in (or is in)
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of runs started
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Performs one canary run
    ///
    /// # Run Flow
    ///
    /// 1. Optionally reset the page (failure is reported, never fatal)
    /// 2. Parse the target; on failure stop before navigating and report no step
    /// 3. Navigate once inside a step named after the hostname
    /// 4. Classify the result
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - The target answered with a 2xx status
    /// * `Err(CanaryFailure)` - Any other outcome; the host should mark the run failed
    pub async fn run(&mut self) -> RunResult {
        self.state.advance(RunState::Idle);
        self.runs += 1;

        if self.config.reset_page {
            self.reset_page().await;
        }

        self.state.advance(RunState::Validating);
        let target = self.config.target.as_str();

        let step_name = match validate_target(target) {
            Ok(hostname) => hostname,
            Err(e) => {
                let failure = CanaryFailure::UrlParse {
                    url: target.to_string(),
                    reason: e.to_string(),
                };
                tracing::error!("{}", failure);
                self.state.advance(RunState::ParseFailed);
                return Err(failure);
            }
        };

        self.state.advance(RunState::Navigating);
        let sanitized = sanitize_url(target, &self.config.restricted_url_parameters);
        let driver = Arc::clone(&self.driver);
        let options = &self.config.navigation;
        let restricted = &self.config.restricted_url_parameters;
        let state = &mut self.state;

        let result = run_step(&step_name, self.sink.as_ref(), async {
            let navigation = driver.navigate(target, options).await.map(|response| {
                response.map(|mut response| {
                    response.final_url = response
                        .final_url
                        .map(|url| sanitize_url(&url, restricted));
                    response
                })
            });
            state.advance(RunState::Classifying);
            classify(&sanitized, navigation).map_err(|f| scrub_target(f, target, &sanitized))
        })
        .await;

        match &result {
            Ok(outcome) => {
                tracing::info!("{}", outcome.message());
                if let Some(final_url) = &outcome.final_url {
                    if *final_url != outcome.url {
                        tracing::info!("Redirected to {}", final_url);
                    }
                }
            }
            Err(failure) => tracing::error!("{}", failure),
        }
        self.state
            .advance(RunState::terminal_for(outcome_kind(&result)));

        result
    }

    async fn reset_page(&self) {
        tracing::debug!("Resetting page to {}", BLANK_PAGE);
        if let Err(e) = self.driver.reset().await {
            tracing::warn!("Unable to open a blank page: {}", e);
            self.sink.add_execution_error("Unable to open a blank page", &e);
        }
    }
}

/// Replaces any echo of the raw target in a driver's error text with its
/// sanitized form
fn scrub_target(failure: CanaryFailure, raw: &str, sanitized: &str) -> CanaryFailure {
    match failure {
        CanaryFailure::Navigation { url, message } => {
            let normalized = ::url::Url::parse(raw).map(String::from).ok();
            if normalized.as_deref() == Some(sanitized) {
                return CanaryFailure::Navigation { url, message };
            }

            let mut message = message.replace(raw, sanitized);
            if let Some(normalized) = normalized {
                message = message.replace(&normalized, sanitized);
            }
            CanaryFailure::Navigation { url, message }
        }
        other => other,
    }
}
