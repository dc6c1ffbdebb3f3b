//! Move aggregates derived from turn segments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a tool call move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallStatus {
    /// Arguments are still streaming in.
    Forming,
    /// Arguments are complete; the tool is executing.
    Running,
    /// The result has arrived (or the turn ended).
    Done,
}

impl std::fmt::Display for ToolCallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Forming => "forming",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// One render-level block in an agent turn: a thinking block or a tool
/// call. Created on the segment's `*_start` event, updated on `*_delta`,
/// finalized on `*_end` / `tool_result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// A thinking block.
    Thinking {
        /// Segment id from the stream.
        id: String,
        /// Accumulated delta fragments, in arrival order.
        segments: Vec<String>,
        /// Whether deltas are still arriving.
        streaming: bool,
    },
    /// A tool call.
    ToolCall {
        /// Segment id from the stream.
        id: String,
        /// Tool name.
        name: String,
        /// Accumulated argument text as streamed.
        input_text: String,
        /// Structured arguments, once complete.
        input: Option<Value>,
        /// Result preview, once the tool has run.
        result: Option<String>,
        /// Lifecycle status.
        status: ToolCallStatus,
    },
}

impl Move {
    /// Segment id of this move.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Thinking { id, .. } | Self::ToolCall { id, .. } => id,
        }
    }

    /// Full thinking text, for a thinking move.
    #[must_use]
    pub fn thinking_text(&self) -> Option<String> {
        match self {
            Self::Thinking { segments, .. } => Some(segments.concat()),
            Self::ToolCall { .. } => None,
        }
    }

    /// Whether this move has reached its final state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        match self {
            Self::Thinking { streaming, .. } => !streaming,
            Self::ToolCall { status, .. } => *status == ToolCallStatus::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thinking_text_concatenates_segments() {
        let m = Move::Thinking {
            id: "t1".to_string(),
            segments: vec!["Plan:".to_string(), "\n- step".to_string()],
            streaming: true,
        };
        assert_eq!(m.thinking_text(), Some("Plan:\n- step".to_string()));
        assert!(!m.is_settled());
    }

    #[test]
    fn tool_call_settles_when_done() {
        let m = Move::ToolCall {
            id: "t2".to_string(),
            name: "web_search".to_string(),
            input_text: String::new(),
            input: None,
            result: None,
            status: ToolCallStatus::Running,
        };
        assert!(!m.is_settled());
        assert_eq!(m.thinking_text(), None);
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(ToolCallStatus::Forming.to_string(), "forming");
        assert_eq!(ToolCallStatus::Running.to_string(), "running");
        assert_eq!(ToolCallStatus::Done.to_string(), "done");
    }
}
