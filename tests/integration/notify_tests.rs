//! Integration tests for alarm notifications
//!
//! A wiremock server stands in for the chat webhook.

use canary_runner::notify::{build_message, post_webhook, AlarmTransition, NotifyChannel};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sns_event(new_state: &str, old_state: &str) -> String {
    let alarm = json!({
        "AlarmName": "api.example.com canary",
        "AlarmDescription": "Synthetic check failing",
        "NewStateValue": new_state,
        "OldStateValue": old_state,
        "Trigger": {
            "Statistic": "Sum",
            "MetricName": "Failed",
            "ComparisonOperator": "GreaterThanOrEqualToThreshold",
            "Threshold": 1.0,
            "EvaluationPeriods": 1,
            "Period": 300
        }
    });

    json!({ "Records": [{ "Sns": { "Message": alarm.to_string() } }] }).to_string()
}

/// Decodes the body of the single request the mock server saw
async fn received_body(mock_server: &MockServer) -> Value {
    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled by default");
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).expect("Body should be JSON")
}

#[tokio::test]
async fn test_slack_alarm_is_posted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/hook"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let alarm = AlarmTransition::from_sns_event(&sns_event("ALARM", "OK")).unwrap();
    let message = build_message(NotifyChannel::Slack, &alarm);
    let client = reqwest::Client::new();

    let status = post_webhook(&client, &format!("{}/services/hook", mock_server.uri()), &message)
        .await
        .unwrap();

    assert_eq!(status, 200);

    let posted = received_body(&mock_server).await;
    assert_eq!(posted["text"], "*CloudWatch Alarm*");
    assert_eq!(posted["attachments"][0]["color"], "CC3300");
    assert_eq!(posted, message);
}

#[tokio::test]
async fn test_teams_recovery_is_posted_green() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let alarm = AlarmTransition::from_sns_event(&sns_event("OK", "ALARM")).unwrap();
    let message = build_message(NotifyChannel::Teams, &alarm);

    let status = post_webhook(&reqwest::Client::new(), &mock_server.uri(), &message)
        .await
        .unwrap();

    assert_eq!(status, 200);

    let posted = received_body(&mock_server).await;
    assert_eq!(posted["@type"], "MessageCard");
    assert_eq!(posted["themeColor"], "339900");
    assert_eq!(
        posted["sections"][0]["facts"][0]["value"],
        "Sum Failed GreaterThanOrEqualToThreshold 1 for 1 period(s) of 300 seconds."
    );
}

#[tokio::test]
async fn test_webhook_rejection_returns_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let alarm = AlarmTransition::from_sns_event(&sns_event("INSUFFICIENT_DATA", "OK")).unwrap();
    let message = build_message(NotifyChannel::Slack, &alarm);
    assert_eq!(message["attachments"][0]["color"], "FFCC00");

    let status = post_webhook(&reqwest::Client::new(), &mock_server.uri(), &message)
        .await
        .unwrap();

    assert_eq!(status, 403);
}

#[tokio::test]
async fn test_unreachable_webhook_is_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let alarm = AlarmTransition::from_sns_event(&sns_event("ALARM", "OK")).unwrap();
    let message = build_message(NotifyChannel::Slack, &alarm);

    let result = post_webhook(
        &reqwest::Client::new(),
        &format!("http://127.0.0.1:{}/hook", port),
        &message,
    )
    .await;

    assert!(result.is_err());
}
