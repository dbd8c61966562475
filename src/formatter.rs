//! Slack mrkdwn rendering for notification content.
//!
//! One formatting strategy per [MessageContent] variant. The output-run case
//! is a fold over the events carrying the previous event's format, so
//! consecutive verbatim lines collapse into a single block.

use crate::types::{FragmentKind, MessageContent, OutputFormat, OutputRecord};

/// Block-quote delimiter of the channel markup dialect.
const BLOCK: &str = "```";

/// Renders notification content as channel markup text.
pub fn format_content(content: &MessageContent) -> String {
  match content {
    MessageContent::Text(text) => text.clone(),
    MessageContent::Fragment { kind, value } => format_fragment(*kind, value),
    MessageContent::OutputRun(events) => format_output_run(events),
  }
}

fn format_fragment(kind: FragmentKind, value: &str) -> String {
  match kind {
    FragmentKind::Verbatim | FragmentKind::Error => format!("{BLOCK}{value}{BLOCK}"),
    FragmentKind::Bold => format!("*{value}*"),
    FragmentKind::Italics => format!("_{value}_"),
    FragmentKind::Plain => value.to_string(),
  }
}

/// Folds an ordered output run into one text. Empty input yields "".
pub(crate) fn format_output_run(events: &[OutputRecord]) -> String {
  let mut text = String::new();
  let mut last_format: Option<OutputFormat> = None;

  for event in events {
    match event.format {
      OutputFormat::Verbatim => {
        if last_format == Some(OutputFormat::Verbatim) {
          // Previous iteration left the text ending in a block delimiter;
          // reopen that block instead of starting a second one.
          text.truncate(text.len() - BLOCK.len());
          text.push('\n');
          text.push_str(&event.message);
          text.push_str(BLOCK);
        } else {
          text.push('\n');
          text.push_str(BLOCK);
          text.push_str(&event.message);
          text.push_str(BLOCK);
        }
      }
      OutputFormat::Italics => {
        text.push_str("\n_ ");
        text.push_str(&event.message.replace('\n', " "));
        text.push_str(" _");
      }
      _ => {
        // Last-wins: a plain message replaces the accumulated text.
        text.clear();
        text.push('\n');
        text.push_str(&event.message);
      }
    }
    last_format = Some(event.format);
  }

  text
}
