//! Outcome classification
//!
//! Maps whatever the page driver produced for a navigation onto the closed
//! set of outcomes. Failures come back as `Err` so that the step executor is
//! the single place that turns them into a failed step and a failed run.

use crate::canary::outcome::{CanaryFailure, Outcome, RunResult};
use crate::driver::{DriverError, NavigationResult};
use std::ops::RangeInclusive;

/// Status codes that count as a healthy response
///
/// Redirects that reach the canary un-followed (3xx) are failures like any
/// other non-2xx status.
pub const SUCCESS_STATUS: RangeInclusive<u16> = 200..=299;

/// Returns true if `status` is a healthy response
pub fn is_success_status(status: u16) -> bool {
    SUCCESS_STATUS.contains(&status)
}

/// Classifies one navigation
///
/// # Decision Table
///
/// | Driver produced | Result |
/// |-----------------|--------|
/// | an error | `Err(Navigation)`, diagnostic = driver error text |
/// | no response | `Err(NoResponse)` |
/// | status outside 200..=299 | `Err(BadStatus)` with status and status text |
/// | status inside 200..=299 | `Ok(Outcome)` |
///
/// # Arguments
///
/// * `sanitized_url` - The target as it should appear in diagnostics
/// * `navigation` - What the driver returned
pub fn classify(
    sanitized_url: &str,
    navigation: Result<Option<NavigationResult>, DriverError>,
) -> RunResult {
    let response = match navigation {
        Ok(Some(response)) => response,
        Ok(None) => {
            return Err(CanaryFailure::NoResponse {
                url: sanitized_url.to_string(),
            })
        }
        Err(e) => {
            return Err(CanaryFailure::Navigation {
                url: sanitized_url.to_string(),
                message: e.to_string(),
            })
        }
    };

    if !is_success_status(response.status) {
        return Err(CanaryFailure::BadStatus {
            url: sanitized_url.to_string(),
            status: response.status,
            status_text: response.status_text,
        });
    }

    Ok(Outcome {
        url: sanitized_url.to_string(),
        status: response.status,
        status_text: response.status_text,
        final_url: response.final_url,
    })
}
