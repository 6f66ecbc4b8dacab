use crate::UrlError;
use url::Url;

/// Parses a canary target and returns the hostname used as its step name
///
/// The check runs before any navigation so that a malformed target never
/// turns into a step name, which downstream becomes a metric dimension.
///
/// # Arguments
///
/// * `raw` - The target URL exactly as configured
///
/// # Returns
///
/// * `Ok(String)` - The URL's host, as a WHATWG `hostname` would render it
/// * `Err(UrlError::Parse)` - The string is not an absolute URL
/// * `Err(UrlError::MissingHost)` - The URL parsed but names no host
///
/// # Examples
///
/// ```
/// use canary_runner::url::validate_target;
///
/// assert_eq!(validate_target("https://example.com").unwrap(), "example.com");
/// assert_eq!(validate_target("https://Example.COM:8443/a?b=c").unwrap(), "example.com");
/// assert!(validate_target("not a url").is_err());
/// ```
pub fn validate_target(raw: &str) -> Result<String, UrlError> {
    let url = Url::parse(raw)?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(UrlError::MissingHost),
    }
}
