//! Content shapes accepted by the notification formatter.

use serde::{Deserialize, Serialize};

use super::OutputFormat;

/// One buffered unit of node output: the text payload plus its display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
  pub message: String,
  pub format: OutputFormat,
}

impl OutputRecord {
  pub fn new(message: impl Into<String>, format: OutputFormat) -> Self {
    Self {
      message: message.into(),
      format,
    }
  }
}

/// Kind tag of a single formatted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
  /// Block-quoted, for captured command output.
  Verbatim,
  /// Block-quoted, same rendering as [Verbatim](FragmentKind::Verbatim).
  Error,
  Bold,
  Italics,
  /// No markup, value passes through unchanged.
  Plain,
}

/// Input to the formatter, one variant per formatting strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
  /// Plain string, returned unchanged.
  Text(String),
  /// Single fragment wrapped in the markup for its kind.
  Fragment { kind: FragmentKind, value: String },
  /// Ordered output events for one node and one stream, folded into a
  /// single text with run-length merging of consecutive verbatim lines.
  OutputRun(Vec<OutputRecord>),
}
