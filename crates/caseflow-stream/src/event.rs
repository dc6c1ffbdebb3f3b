//! The turn event union.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event in an agent turn stream.
///
/// Produced strictly in this relative order per turn: exactly one
/// [`TurnStart`](TurnEvent::TurnStart); zero or more thinking or tool
/// segments, each bracketed by its own `*Start`/`*Delta`/`*End` events
/// (with an optional [`ToolResult`](TurnEvent::ToolResult) after its
/// `ToolEnd`); then text deltas; then exactly one
/// [`TurnEnd`](TurnEvent::TurnEnd). Each segment id is unique per turn and
/// scopes all deltas of that segment.
///
/// [`Error`](TurnEvent::Error) is terminal wherever it appears: nothing
/// follows it, including `TurnEnd`. The mock provider never emits it; it
/// exists for live backend substitution.
///
/// Serializes as `{"type": "...", "data": {...}}` with snake_case tags,
/// matching the canvas client's wire shape. Consumers deserializing a
/// tag from a newer producer get [`Unknown`](TurnEvent::Unknown), which
/// they must ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TurnEvent {
    /// The turn has begun.
    TurnStart,
    /// A thinking segment opened.
    ThinkingStart {
        /// Segment id.
        id: String,
    },
    /// Incremental thinking text.
    ThinkingDelta {
        /// Segment id.
        id: String,
        /// Text fragment.
        delta: String,
    },
    /// The thinking segment closed.
    ThinkingEnd {
        /// Segment id.
        id: String,
        /// The complete thought.
        thought: String,
    },
    /// A tool call segment opened.
    ToolStart {
        /// Segment id.
        id: String,
        /// Tool name.
        name: String,
    },
    /// Incremental tool-argument text.
    ToolDelta {
        /// Segment id.
        id: String,
        /// Argument JSON fragment.
        delta: String,
    },
    /// The tool call's arguments are complete.
    ToolEnd {
        /// Segment id.
        id: String,
        /// Tool name.
        name: String,
        /// Structured arguments.
        input: Value,
    },
    /// The tool finished executing.
    ToolResult {
        /// Segment id of the corresponding tool call.
        id: String,
        /// Tool name.
        name: String,
        /// Result preview text.
        result: String,
    },
    /// Incremental final-answer text.
    TextDelta {
        /// Text fragment.
        delta: String,
    },
    /// The turn completed normally.
    #[serde(rename_all = "camelCase")]
    TurnEnd {
        /// The complete final answer.
        final_text: String,
        /// Number of moves (thinking + tool segments) in the turn.
        move_count: usize,
    },
    /// The turn ended abnormally. Terminal; aborts immediately with no
    /// segment finalization and no `TurnEnd` after it.
    Error {
        /// Human-readable failure description.
        message: String,
    },
    /// Unrecognized event from a newer producer. Safe to ignore.
    #[serde(other)]
    Unknown,
}

impl TurnEvent {
    /// Wire tag of this event.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TurnStart => "turn_start",
            Self::ThinkingStart { .. } => "thinking_start",
            Self::ThinkingDelta { .. } => "thinking_delta",
            Self::ThinkingEnd { .. } => "thinking_end",
            Self::ToolStart { .. } => "tool_start",
            Self::ToolDelta { .. } => "tool_delta",
            Self::ToolEnd { .. } => "tool_end",
            Self::ToolResult { .. } => "tool_result",
            Self::TextDelta { .. } => "text_delta",
            Self::TurnEnd { .. } => "turn_end",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    /// The segment id this event belongs to, if any.
    #[must_use]
    pub fn segment_id(&self) -> Option<&str> {
        match self {
            Self::ThinkingStart { id }
            | Self::ThinkingDelta { id, .. }
            | Self::ThinkingEnd { id, .. }
            | Self::ToolStart { id, .. }
            | Self::ToolDelta { id, .. }
            | Self::ToolEnd { id, .. }
            | Self::ToolResult { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Whether no further events may follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::TurnEnd { .. } | Self::Error { .. })
    }
}
