//! Stateful event subscriber: buffers per-node output and sends one channel
//! notification per failing non-pipeline node.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{info, trace};

use crate::config::{ChannelConfig, NodeUrlBuilder};
use crate::delivery::{NotifyError, SlackChannel};
use crate::types::{Event, MessageContent, NodePath, OutputFormat, OutputRecord};

/// Subscriber fed one [Event] at a time, in emission order, by the pipeline
/// execution engine. A returned error aborts event processing for the run.
#[async_trait]
pub trait EventHandler {
  async fn handle_event(&mut self, event: Event) -> Result<(), NotifyError>;
}

/// Aggregates node output for one pipeline run and notifies the channel when
/// a non-pipeline node fails.
///
/// One instance per run; buffers live from construction to run completion and
/// are never evicted. Callers must serialize access - the handler performs no
/// locking of its own.
pub struct NotificationHandler<C, U> {
  config: C,
  url_builder: U,
  channel: SlackChannel,
  outputs: HashMap<NodePath, Vec<OutputRecord>>,
  error_outputs: HashMap<NodePath, Vec<OutputRecord>>,
}

impl<C, U> NotificationHandler<C, U>
where
  C: ChannelConfig,
  U: NodeUrlBuilder,
{
  /// Builds a handler delivering to the default webhook host.
  pub fn new(config: C, url_builder: U) -> Self {
    let channel = SlackChannel::new(config.channel_secret());
    Self::with_channel(config, url_builder, channel)
  }

  /// Like [new](NotificationHandler::new) but with an explicit channel
  /// (e.g. a non-default webhook root).
  pub fn with_channel(config: C, url_builder: U, channel: SlackChannel) -> Self {
    Self {
      config,
      url_builder,
      channel,
      outputs: HashMap::new(),
      error_outputs: HashMap::new(),
    }
  }

  /// Files the output into exactly one buffer, chosen by `is_error`.
  fn record_output(
    &mut self,
    node_path: NodePath,
    message: String,
    format: OutputFormat,
    is_error: bool,
  ) {
    let buffer = if is_error {
      &mut self.error_outputs
    } else {
      &mut self.outputs
    };
    buffer
      .entry(node_path)
      .or_default()
      .push(OutputRecord { message, format });
  }

  fn headline(&self, node_path: &NodePath) -> String {
    format!(
      "\n:baby_chick: Ooops, a hiccup in _ <{}{} | {} > _",
      self.config.base_url(),
      self.url_builder.detail_page_url(node_path),
      node_path,
    )
  }

  /// Reads both buffers (empty when the node produced nothing) and delivers.
  /// Buffers are left untouched, so a duplicate completion event re-sends.
  async fn notify_failure(&self, node_path: &NodePath) -> Result<(), NotifyError> {
    let output = self
      .outputs
      .get(node_path)
      .map(Vec::as_slice)
      .unwrap_or_default();
    let error_output = self
      .error_outputs
      .get(node_path)
      .map(Vec::as_slice)
      .unwrap_or_default();
    info!(node = %node_path, "node failed, notifying channel");
    self
      .channel
      .deliver(
        MessageContent::Text(self.headline(node_path)),
        output,
        error_output,
      )
      .await
  }
}

#[async_trait]
impl<C, U> EventHandler for NotificationHandler<C, U>
where
  C: ChannelConfig + Send + Sync,
  U: NodeUrlBuilder + Send + Sync,
{
  async fn handle_event(&mut self, event: Event) -> Result<(), NotifyError> {
    match event {
      Event::Output {
        node_path,
        message,
        format,
        is_error,
      } => {
        trace!(node = %node_path, is_error, "buffering output");
        self.record_output(node_path, message, format, is_error);
        Ok(())
      }
      Event::NodeFinished {
        node_path,
        succeeded,
        is_pipeline,
      } => {
        // The root node's completion would re-report every leaf failure
        // that already sent its own notification, so it never fires.
        if !succeeded && !is_pipeline {
          self.notify_failure(&node_path).await
        } else {
          Ok(())
        }
      }
    }
  }
}
