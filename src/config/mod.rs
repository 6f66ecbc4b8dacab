//! Configuration module for Canary-Runner
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and owns the `TargetUrl` newtype that a canary cannot be built without.
//!
//! # Example
//!
//! ```no_run
//! use canary_runner::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("canary.toml")).unwrap();
//! println!("Navigation timeout: {}ms", config.canary.navigation_timeout_ms);
//! ```

mod parser;
mod target;
mod types;
mod validation;

// Re-export types
pub use target::TargetUrl;
pub use types::{
    CanarySettings, Config, NotifyConfig, OutputConfig, SanitizeConfig, UserAgentConfig,
    DEFAULT_INTERVAL_SECONDS, DEFAULT_NAVIGATION_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
