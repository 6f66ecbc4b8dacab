use crate::driver::WaitUntil;
use crate::notify::NotifyChannel;
use serde::Deserialize;

/// Default navigation timeout, matching the deployed canary script
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default delay between scheduled runs
pub const DEFAULT_INTERVAL_SECONDS: u64 = 300;

/// Main configuration structure for Canary-Runner
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canary: CanarySettings,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl Config {
    /// Builds a default configuration that checks `target_url`
    pub fn from_target(target_url: &str) -> Self {
        let mut config = Self::default();
        config.canary.target_url = Some(target_url.to_string());
        config
    }

    /// Applies values that the hosting environment supplies out of band
    ///
    /// `URL` and `WEBHOOK_URL` win over the file, the same precedence the
    /// deployed functions gave their environment.
    pub fn with_overrides(mut self, target_url: Option<String>, webhook_url: Option<String>) -> Self {
        if let Some(url) = target_url {
            self.canary.target_url = Some(url);
        }
        if let Some(url) = webhook_url {
            self.notify.webhook_url = Some(url);
        }
        self
    }
}

/// Canary behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CanarySettings {
    /// URL to navigate to on every run
    #[serde(default)]
    pub target_url: Option<String>,

    /// Navigation timeout (milliseconds)
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// When a navigation counts as finished: `commit`, `dom-content-loaded`
    /// or `load`
    #[serde(default)]
    pub wait_until: WaitUntil,

    /// Reset the page to a blank document before each run
    #[serde(default)]
    pub reset_page: bool,

    /// Delay between runs in `watch` mode (seconds)
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for CanarySettings {
    fn default() -> Self {
        Self {
            target_url: None,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            wait_until: WaitUntil::default(),
            reset_page: false,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
        }
    }
}

fn default_navigation_timeout_ms() -> u64 {
    DEFAULT_NAVIGATION_TIMEOUT_MS
}

fn default_interval_seconds() -> u64 {
    DEFAULT_INTERVAL_SECONDS
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version sent in the User-Agent header
    #[serde(default = "default_agent_version")]
    pub version: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

fn default_agent_name() -> String {
    "canary-runner".to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log/report redaction configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SanitizeConfig {
    /// Query parameters whose values are redacted in diagnostics
    #[serde(default)]
    pub restricted_url_parameters: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the SQLite run-history database; history is off when unset
    #[serde(default)]
    pub database_path: Option<String>,
}

/// Alarm notification configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NotifyConfig {
    /// Chat flavor of the outgoing message
    #[serde(default)]
    pub channel: NotifyChannel,

    /// Incoming-webhook URL of the chat channel
    #[serde(default)]
    pub webhook_url: Option<String>,
}
