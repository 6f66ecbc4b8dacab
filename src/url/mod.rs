//! URL handling module for Canary-Runner
//!
//! This module turns the configured target into a step name (its hostname)
//! and renders URLs for diagnostics with credentials and restricted query
//! values removed.

mod sanitize;
mod validate;

pub use sanitize::{sanitize_url, REDACTED};
pub use validate::validate_target;
