use crate::notify::{AlarmColor, AlarmTransition};
use serde_json::{json, Value};

/// Builds a Microsoft Teams `MessageCard` for an alarm transition
pub fn teams_message(alarm: &AlarmTransition) -> Value {
    let color = AlarmColor::for_state(&alarm.new_state);

    json!({
        "@type": "MessageCard",
        "@context": "http://schema.org/extensions",
        "themeColor": color.hex(),
        "summary": "CloudWatch Alarm",
        "sections": [{
            "activityTitle": alarm.alarm_name,
            "activitySubtitle": alarm.alarm_description,
            "facts": [
                { "name": "Trigger", "value": alarm.trigger_summary() },
                { "name": "Old State", "value": alarm.old_state },
                { "name": "Current State", "value": alarm.new_state },
            ],
            "markdown": true,
        }],
    })
}
