//! Alarm notifications
//!
//! Turns an alarm state transition into a chat message and delivers it to an
//! incoming webhook. The mapping is a pure function of the alarm; the only
//! state-dependent choice is the color.

mod alarm;
mod slack;
mod teams;
mod webhook;

pub use alarm::{AlarmTransition, Trigger};
pub use slack::slack_message;
pub use teams::teams_message;
pub use webhook::{post_webhook, resolve_webhook_url};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while building or sending a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid alarm payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event contains no records")]
    NoRecords,

    #[error("Failed to post to {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Chat flavor of the outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotifyChannel {
    #[default]
    Slack,
    Teams,
}

/// Color used to theme an alarm message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmColor {
    Red,
    Green,
    Amber,
}

impl AlarmColor {
    /// `ALARM` is red, `OK` is green, anything else (e.g. `INSUFFICIENT_DATA`) is amber
    pub fn for_state(state: &str) -> Self {
        match state {
            "ALARM" => Self::Red,
            "OK" => Self::Green,
            _ => Self::Amber,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "CC3300",
            Self::Green => "339900",
            Self::Amber => "FFCC00",
        }
    }
}

/// Builds the message for `channel`
pub fn build_message(channel: NotifyChannel, alarm: &AlarmTransition) -> Value {
    match channel {
        NotifyChannel::Slack => slack_message(alarm),
        NotifyChannel::Teams => teams_message(alarm),
    }
}
