//! # pipeline-notify
//!
//! Slack failure notifications for pipeline runs, driven by lifecycle events.
//!
//! ## Architecture
//!
//! The execution engine pushes [Event]s into a [NotificationHandler] one at a
//! time, in emission order. The handler buffers per-node output (normal and
//! error streams separately), and when a non-pipeline node finishes
//! unsuccessfully it renders the buffered output as channel markup and posts
//! one message to the channel's incoming webhook.
//!
//! The handler owns no threads and no queues; the only suspension point is
//! the outbound POST, awaited inline, so a delivery failure surfaces to the
//! event-processing caller.

pub mod config;
pub mod delivery;
#[cfg(test)]
mod delivery_test;
pub mod formatter;
pub mod handler;
pub mod types;

pub use config::{ChannelConfig, NodePageUrl, NodeUrlBuilder, StaticConfig};
pub use delivery::{DEFAULT_WEBHOOK_ROOT, NotifyError, SlackChannel};
pub use formatter::format_content;
pub use handler::{EventHandler, NotificationHandler};
pub use types::{Event, FragmentKind, MessageContent, NodePath, OutputFormat, OutputRecord};
