use crate::notify::{AlarmColor, AlarmTransition};
use serde_json::{json, Value};

/// Builds a Slack incoming-webhook message for an alarm transition
pub fn slack_message(alarm: &AlarmTransition) -> Value {
    let color = AlarmColor::for_state(&alarm.new_state);

    json!({
        "text": "*CloudWatch Alarm*",
        "attachments": [{
            "color": color.hex(),
            "fields": [
                { "title": "Alarm Name", "value": alarm.alarm_name, "short": true },
                { "title": "Alarm Description", "value": alarm.alarm_description, "short": false },
                { "title": "Trigger", "value": alarm.trigger_summary(), "short": false },
                { "title": "Old State", "value": alarm.old_state, "short": true },
                { "title": "Current State", "value": alarm.new_state, "short": true },
            ],
        }],
    })
}
