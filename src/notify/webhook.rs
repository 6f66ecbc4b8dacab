use crate::config::Config;
use crate::notify::NotifyError;
use crate::ConfigError;
use reqwest::Client;
use serde_json::Value;

/// Resolves the webhook to post to: an explicit value beats the config file
pub fn resolve_webhook_url(
    config: &Config,
    explicit: Option<&str>,
) -> Result<String, ConfigError> {
    explicit
        .map(str::to_string)
        .or_else(|| config.notify.webhook_url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingWebhookUrl)
}

/// Posts a JSON payload to a chat webhook
///
/// # Returns
///
/// * `Ok(u16)` - The webhook answered; its status code (non-2xx included)
/// * `Err(NotifyError)` - The request could not be delivered
pub async fn post_webhook(client: &Client, url: &str, payload: &Value) -> Result<u16, NotifyError> {
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(|source| NotifyError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Webhook {} answered {}", url, status);
    }
    Ok(status.as_u16())
}
