use crate::ConfigError;
use std::fmt;

/// The URL a canary checks
///
/// Only constructible from a present, non-blank string, so a canary can never
/// be started without a target. Whether the string is a *well-formed* URL is
/// deliberately not checked here: a malformed target is a run-level
/// `UrlParse` failure, not a configuration defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Wraps the configured target
    ///
    /// # Returns
    ///
    /// * `Ok(TargetUrl)` - The value was present and non-blank
    /// * `Err(ConfigError::MissingTargetUrl)` - Absent, empty or whitespace only
    ///
    /// # Examples
    ///
    /// ```
    /// use canary_runner::config::TargetUrl;
    ///
    /// let target = TargetUrl::new(Some("https://example.com".to_string())).unwrap();
    /// assert_eq!(target.as_str(), "https://example.com");
    ///
    /// assert!(TargetUrl::new(None).is_err());
    /// assert!(TargetUrl::new(Some("   ".to_string())).is_err());
    /// ```
    pub fn new(raw: Option<String>) -> Result<Self, ConfigError> {
        match raw {
            Some(value) if !value.trim().is_empty() => Ok(Self(value.trim().to_string())),
            _ => Err(ConfigError::MissingTargetUrl),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
