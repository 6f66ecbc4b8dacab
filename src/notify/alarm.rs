use crate::notify::NotifyError;
use serde::Deserialize;

/// An alarm changing state, as published by CloudWatch
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmTransition {
    pub alarm_name: String,
    #[serde(default)]
    pub alarm_description: Option<String>,
    pub trigger: Trigger,
    #[serde(rename = "OldStateValue")]
    pub old_state: String,
    #[serde(rename = "NewStateValue")]
    pub new_state: String,
}

/// The metric condition behind an alarm
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
    pub statistic: String,
    pub metric_name: String,
    pub comparison_operator: String,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub period: u64,
}

#[derive(Deserialize)]
struct SnsEvent {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Deserialize)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsMessage,
}

#[derive(Deserialize)]
struct SnsMessage {
    #[serde(rename = "Message")]
    message: String,
}

impl AlarmTransition {
    /// Parses the alarm JSON document itself
    pub fn from_json(json: &str) -> Result<Self, NotifyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Extracts the alarm from an SNS delivery (`Records[0].Sns.Message`)
    ///
    /// Only the first record is read; SNS delivers one per invocation.
    pub fn from_sns_event(json: &str) -> Result<Self, NotifyError> {
        let event: SnsEvent = serde_json::from_str(json)?;
        let record = event.records.into_iter().next().ok_or(NotifyError::NoRecords)?;
        Self::from_json(&record.sns.message)
    }

    /// Parses either an SNS delivery or a bare alarm document
    ///
    /// Anything with a `Records` key is treated as an SNS delivery, so a
    /// malformed envelope reports its own decode error.
    pub fn from_any(json: &str) -> Result<Self, NotifyError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("Records").is_some() {
            Self::from_sns_event(json)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// One-line description of the alarm condition
    ///
    /// ```text
    /// Sum Errors GreaterThanThreshold 1 for 1 period(s) of 300 seconds.
    /// ```
    pub fn trigger_summary(&self) -> String {
        let t = &self.trigger;
        format!(
            "{} {} {} {} for {} period(s) of {} seconds.",
            t.statistic,
            t.metric_name,
            t.comparison_operator,
            format_threshold(t.threshold),
            t.evaluation_periods,
            t.period
        )
    }
}

/// Renders whole numbers without a trailing `.0`
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
