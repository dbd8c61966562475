//! Event and message types flowing through the notification handler.

mod event;
mod message;

pub use event::{Event, NodePath, OutputFormat};
pub use message::{FragmentKind, MessageContent, OutputRecord};
