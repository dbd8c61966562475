//! Outbound delivery: one JSON POST per notification to the channel's
//! incoming webhook.

use serde::Serialize;
use tracing::instrument;

use crate::formatter::{format_content, format_output_run};
use crate::types::{MessageContent, OutputRecord};

/// Fixed host of the channel's incoming webhooks.
pub const DEFAULT_WEBHOOK_ROOT: &str = "https://hooks.slack.com";

/// Color hint applied to the error-output attachment.
const ERROR_COLOR: &str = "#eb4d5c";

/// Failure raised while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
  /// The channel endpoint answered with a non-success status. Fatal for the
  /// delivery attempt; never retried here.
  #[error("channel returned status {status}: {body}")]
  ChannelRejected { status: u16, body: String },
  /// The POST itself failed (connection, DNS, ...). Passed through
  /// untranslated from the transport.
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

/// Wire shape of the webhook body: `{"text": ..., "attachments": [...]}`.
#[derive(Debug, Serialize)]
struct WebhookMessage {
  text: String,
  attachments: Vec<Attachment>,
}

/// Secondary formatted text block sent alongside the headline.
#[derive(Debug, Serialize)]
struct Attachment {
  text: String,
  mrkdwn_in: Vec<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  color: Option<&'static str>,
}

/// Channel delivery over a shared HTTP client. Each call is one synchronous
/// POST, awaited inline; no timeout or retry is configured at this layer.
pub struct SlackChannel {
  client: reqwest::Client,
  webhook_root: String,
  secret: String,
}

impl SlackChannel {
  pub fn new(channel_secret: impl Into<String>) -> Self {
    Self::with_webhook_root(DEFAULT_WEBHOOK_ROOT, channel_secret)
  }

  /// Points delivery at a different webhook host (tests, egress proxies).
  pub fn with_webhook_root(
    webhook_root: impl Into<String>,
    channel_secret: impl Into<String>,
  ) -> Self {
    Self {
      client: reqwest::Client::new(),
      webhook_root: webhook_root.into(),
      secret: channel_secret.into(),
    }
  }

  /// Formats and posts one notification. An attachment is added per non-empty
  /// output run; zero buffered output still posts the headline with an empty
  /// attachments list.
  #[instrument(level = "trace", skip(self, headline, output, error_output))]
  pub async fn deliver(
    &self,
    headline: MessageContent,
    output: &[OutputRecord],
    error_output: &[OutputRecord],
  ) -> Result<(), NotifyError> {
    let mut attachments = Vec::new();
    if !output.is_empty() {
      attachments.push(Attachment {
        text: format_output_run(output),
        mrkdwn_in: vec!["text"],
        color: None,
      });
    }
    if !error_output.is_empty() {
      attachments.push(Attachment {
        text: format_output_run(error_output),
        mrkdwn_in: vec!["text"],
        color: Some(ERROR_COLOR),
      });
    }
    let message = WebhookMessage {
      text: format_content(&headline),
      attachments,
    };

    let url = format!("{}/services/{}", self.webhook_root, self.secret);
    let response = self.client.post(&url).json(&message).send().await?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await?;
      return Err(NotifyError::ChannelRejected {
        status: status.as_u16(),
        body,
      });
    }
    Ok(())
  }
}
