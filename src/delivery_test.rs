//! Tests for `SlackChannel` webhook delivery.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::delivery::{NotifyError, SlackChannel};
use crate::types::{FragmentKind, MessageContent, OutputFormat, OutputRecord};

fn channel_against(server: &MockServer) -> SlackChannel {
  SlackChannel::with_webhook_root(server.uri(), "T11/B22/s3cr3t")
}

#[tokio::test]
async fn posts_json_to_the_secret_services_path() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/services/T11/B22/s3cr3t"))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;

  let channel = channel_against(&server);
  channel
    .deliver(MessageContent::Text("headline".to_string()), &[], &[])
    .await
    .unwrap();

  let requests = server.received_requests().await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
  assert_eq!(body["text"], "headline");
  assert_eq!(body["attachments"], serde_json::json!([]));
  let content_type = requests[0].headers.get("content-type").unwrap();
  assert_eq!(content_type.to_str().unwrap(), "application/json");
}

#[tokio::test]
async fn headline_is_rendered_through_the_formatter() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;

  let channel = channel_against(&server);
  channel
    .deliver(
      MessageContent::Fragment {
        kind: FragmentKind::Bold,
        value: "attention".to_string(),
      },
      &[],
      &[],
    )
    .await
    .unwrap();

  let requests = server.received_requests().await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
  assert_eq!(body["text"], "*attention*");
}

#[tokio::test]
async fn color_key_is_omitted_on_the_normal_output_attachment() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;

  let channel = channel_against(&server);
  let normal = vec![OutputRecord::new("out", OutputFormat::Plain)];
  let errors = vec![OutputRecord::new("err", OutputFormat::Plain)];
  channel
    .deliver(MessageContent::Text("h".to_string()), &normal, &errors)
    .await
    .unwrap();

  let requests = server.received_requests().await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
  let attachments = body["attachments"].as_array().unwrap();
  assert_eq!(attachments.len(), 2);
  assert!(attachments[0].as_object().unwrap().get("color").is_none());
  assert_eq!(attachments[1]["color"], "#eb4d5c");
}

#[tokio::test]
async fn non_success_status_fails_with_status_and_body() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(403).set_body_string("invalid_token"))
    .expect(1)
    .mount(&server)
    .await;

  let channel = channel_against(&server);
  let err = channel
    .deliver(MessageContent::Text("h".to_string()), &[], &[])
    .await
    .unwrap_err();
  match err {
    NotifyError::ChannelRejected { status, body } => {
      assert_eq!(status, 403);
      assert_eq!(body, "invalid_token");
    }
    other => panic!("expected ChannelRejected, got {:?}", other),
  }
}

#[tokio::test]
async fn connection_failure_propagates_as_transport_error() {
  // Nothing listens on this port; reqwest fails before any HTTP exchange.
  let channel = SlackChannel::with_webhook_root("http://127.0.0.1:9", "secret");
  let err = channel
    .deliver(MessageContent::Text("h".to_string()), &[], &[])
    .await
    .unwrap_err();
  assert!(matches!(err, NotifyError::Transport(_)));
}
