use crate::config::types::{
    CanarySettings, Config, NotifyConfig, OutputConfig, SanitizeConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Longest navigation timeout accepted (five minutes)
const MAX_NAVIGATION_TIMEOUT_MS: u64 = 300_000;

/// Validates the entire configuration
///
/// The target URL is intentionally not parsed here; see `TargetUrl`.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_canary_settings(&config.canary)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sanitize_config(&config.sanitize)?;
    validate_output_config(&config.output)?;
    validate_notify_config(&config.notify)?;
    Ok(())
}

/// Validates canary behavior settings
fn validate_canary_settings(config: &CanarySettings) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 1 || config.navigation_timeout_ms > MAX_NAVIGATION_TIMEOUT_MS
    {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be between 1 and {}, got {}",
            MAX_NAVIGATION_TIMEOUT_MS, config.navigation_timeout_ms
        )));
    }

    if config.interval_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "interval_seconds must be >= 1, got {}",
            config.interval_seconds
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user agent name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates redaction settings
fn validate_sanitize_config(config: &SanitizeConfig) -> Result<(), ConfigError> {
    if config
        .restricted_url_parameters
        .iter()
        .any(|p| p.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "restricted_url_parameters cannot contain empty names".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.database_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates notification configuration
fn validate_notify_config(config: &NotifyConfig) -> Result<(), ConfigError> {
    if let Some(webhook) = &config.webhook_url {
        validate_webhook_url(webhook)?;
    }
    Ok(())
}

/// Checks that a webhook URL is an absolute HTTP(S) URL
pub(crate) fn validate_webhook_url(webhook: &str) -> Result<(), ConfigError> {
    let url = Url::parse(webhook)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webhook_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "webhook_url '{}' must use HTTP or HTTPS",
            webhook
        )));
    }

    Ok(())
}
