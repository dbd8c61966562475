//! Lifecycle events emitted by the pipeline execution engine.
//!
//! The engine pushes these into an [EventHandler](crate::EventHandler) one at a
//! time, in emission order, for the lifetime of a pipeline run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered position of a node in the pipeline execution tree.
///
/// Segments are kept as a sequence and compared segment-wise, so
/// `["a", "b"]` and `["ab"]` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(Vec<String>);

impl NodePath {
  pub fn new<I, S>(segments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self(segments.into_iter().map(Into::into).collect())
  }

  pub fn segments(&self) -> &[String] {
    &self.0
  }
}

impl fmt::Display for NodePath {
  /// Human-readable form: segments joined with `/`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.join("/"))
  }
}

/// Display format tag carried by an [Output](Event::Output) event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
  Plain,
  Verbatim,
  Italics,
}

/// One lifecycle event of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
  /// A unit of captured text produced by a running node. Arrives zero or
  /// more times per node before that node's [NodeFinished](Event::NodeFinished).
  Output {
    node_path: NodePath,
    message: String,
    format: OutputFormat,
    is_error: bool,
  },
  /// A node's execution concluded. Expected exactly once per node path per run.
  NodeFinished {
    node_path: NodePath,
    succeeded: bool,
    /// True only for the root/aggregate node of the run.
    is_pipeline: bool,
  },
}

#[cfg(test)]
mod tests {
  use super::{Event, NodePath, OutputFormat};

  #[test]
  fn node_path_displays_segments_joined_with_slash() {
    let path = NodePath::new(["etl", "load", "customers"]);
    assert_eq!(path.to_string(), "etl/load/customers");
  }

  #[test]
  fn node_paths_compare_segment_wise() {
    assert_ne!(NodePath::new(["a", "b"]), NodePath::new(["ab"]));
    assert_eq!(NodePath::new(["a", "b"]), NodePath::new(["a", "b"]));
  }

  #[test]
  fn event_serializes_with_kind_tag() {
    let event = Event::Output {
      node_path: NodePath::new(["etl", "load"]),
      message: "42 rows".to_string(),
      format: OutputFormat::Verbatim,
      is_error: false,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"], "output");
    assert_eq!(json["format"], "verbatim");
    assert_eq!(json["node_path"], serde_json::json!(["etl", "load"]));
  }

  #[test]
  fn node_finished_round_trips() {
    let event = Event::NodeFinished {
      node_path: NodePath::new(["etl"]),
      succeeded: false,
      is_pipeline: true,
    };
    let json = serde_json::to_string(&event).unwrap();
    let parsed: Event = serde_json::from_str(&json).unwrap();
    match parsed {
      Event::NodeFinished {
        succeeded,
        is_pipeline,
        ..
      } => {
        assert!(!succeeded);
        assert!(is_pipeline);
      }
      other => panic!("expected NodeFinished, got {:?}", other),
    }
  }
}
