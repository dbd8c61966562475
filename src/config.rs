//! Collaborator seams: process configuration and node detail-page links.
//!
//! The handler never reads configuration sources itself; it consumes these
//! traits so the hosting process can plug in its own config layer and web
//! routing.

use crate::types::NodePath;

/// Process configuration consumed by the notification handler.
pub trait ChannelConfig {
  /// Base URL of the pipeline web UI, without a trailing slash.
  fn base_url(&self) -> &str;
  /// Secret path segment of the channel's incoming webhook.
  fn channel_secret(&self) -> &str;
}

/// Owned-string configuration for processes without a config framework.
#[derive(Debug, Clone)]
pub struct StaticConfig {
  pub base_url: String,
  pub channel_secret: String,
}

impl StaticConfig {
  pub fn new(base_url: impl Into<String>, channel_secret: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      channel_secret: channel_secret.into(),
    }
  }
}

impl ChannelConfig for StaticConfig {
  fn base_url(&self) -> &str {
    &self.base_url
  }

  fn channel_secret(&self) -> &str {
    &self.channel_secret
  }
}

/// Builds the deep link to a node's detail page.
pub trait NodeUrlBuilder {
  /// Returns the URL path of the node's detail page, to be appended to the
  /// configured base URL.
  fn detail_page_url(&self, node_path: &NodePath) -> String;
}

/// Default route builder mirroring the web UI's node page: `/node/<path>`.
#[derive(Debug, Clone, Default)]
pub struct NodePageUrl;

impl NodeUrlBuilder for NodePageUrl {
  fn detail_page_url(&self, node_path: &NodePath) -> String {
    format!("/node/{}", node_path.segments().join("/"))
  }
}
