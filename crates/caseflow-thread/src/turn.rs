//! Folding a turn's event stream into renderable state.

use std::collections::HashSet;

use futures::{Stream, StreamExt};

use caseflow_stream::TurnEvent;

use crate::moves::{Move, ToolCallStatus};

/// Renderable state of one agent turn, built incrementally from events.
///
/// Apply events with [`apply`](TurnView::apply) as they arrive, or drive a
/// whole stream with [`consume`](TurnView::consume). The view tolerates a
/// truncated stream (abandoned turn): whatever was applied so far simply
/// stays marked as streaming.
#[derive(Debug, Default)]
pub struct TurnView {
    moves: Vec<Move>,
    final_segments: Vec<String>,
    final_text: Option<String>,
    reported_move_count: Option<usize>,
    error: Option<String>,
    started: bool,
    finished: bool,
    collapsed: HashSet<String>,
}

impl TurnView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the view.
    ///
    /// Deltas with an unopened segment id and unrecognized events are
    /// ignored; a consumer must never crash on a well-behaved or a
    /// newer-than-expected producer.
    pub fn apply(&mut self, event: &TurnEvent) {
        match event {
            TurnEvent::TurnStart => {
                self.started = true;
            },
            TurnEvent::ThinkingStart { id } => {
                self.moves.push(Move::Thinking {
                    id: id.clone(),
                    segments: Vec::new(),
                    streaming: true,
                });
            },
            TurnEvent::ThinkingDelta { id, delta } => {
                if let Some(Move::Thinking { segments, .. }) = self.find_move(id) {
                    segments.push(delta.clone());
                }
            },
            TurnEvent::ThinkingEnd { id, thought } => {
                if let Some(Move::Thinking {
                    segments,
                    streaming,
                    ..
                }) = self.find_move(id)
                {
                    // The end event carries the authoritative full text.
                    *segments = vec![thought.clone()];
                    *streaming = false;
                }
            },
            TurnEvent::ToolStart { id, name } => {
                self.moves.push(Move::ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    input_text: String::new(),
                    input: None,
                    result: None,
                    status: ToolCallStatus::Forming,
                });
            },
            TurnEvent::ToolDelta { id, delta } => {
                if let Some(Move::ToolCall { input_text, .. }) = self.find_move(id) {
                    input_text.push_str(delta);
                }
            },
            TurnEvent::ToolEnd { id, input, .. } => {
                if let Some(Move::ToolCall {
                    input: move_input,
                    status,
                    ..
                }) = self.find_move(id)
                {
                    *move_input = Some(input.clone());
                    *status = ToolCallStatus::Running;
                }
            },
            TurnEvent::ToolResult { id, result, .. } => {
                if let Some(Move::ToolCall {
                    result: move_result,
                    status,
                    ..
                }) = self.find_move(id)
                {
                    *move_result = Some(result.clone());
                    *status = ToolCallStatus::Done;
                }
            },
            TurnEvent::TextDelta { delta } => {
                self.final_segments.push(delta.clone());
            },
            TurnEvent::TurnEnd {
                final_text,
                move_count,
            } => {
                self.final_text = Some(final_text.clone());
                self.reported_move_count = Some(*move_count);
                self.finished = true;
                self.settle_moves();
            },
            TurnEvent::Error { message } => {
                // Abnormal end: abort immediately, settling whatever was
                // in flight.
                self.error = Some(message.clone());
                self.finished = true;
                self.settle_moves();
            },
            TurnEvent::Unknown => {},
        }
    }

    /// Drive an entire event stream into the view.
    ///
    /// Stops at the stream's end; a terminal event closes the turn, a
    /// truncated stream leaves it marked as still streaming.
    pub async fn consume<S>(&mut self, mut stream: S)
    where
        S: Stream<Item = TurnEvent> + Unpin,
    {
        while let Some(event) = stream.next().await {
            self.apply(&event);
        }
    }

    /// The moves derived so far, in stream order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves derived from the stream.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Move count reported by `turn_end`, once seen.
    #[must_use]
    pub fn reported_move_count(&self) -> Option<usize> {
        self.reported_move_count
    }

    /// Final answer fragments as streamed so far.
    #[must_use]
    pub fn final_segments(&self) -> &[String] {
        &self.final_segments
    }

    /// Complete final answer, once the turn ended normally.
    #[must_use]
    pub fn final_text(&self) -> Option<&str> {
        self.final_text.as_deref()
    }

    /// Error message, if the turn ended abnormally.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the turn is still streaming.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.started && !self.finished
    }

    /// Toggle a move's collapsed state. UI-local, not part of the protocol.
    pub fn toggle_collapsed(&mut self, move_id: &str) {
        if !self.collapsed.remove(move_id) {
            self.collapsed.insert(move_id.to_string());
        }
    }

    /// Whether a move is collapsed.
    #[must_use]
    pub fn is_collapsed(&self, move_id: &str) -> bool {
        self.collapsed.contains(move_id)
    }

    fn find_move(&mut self, id: &str) -> Option<&mut Move> {
        self.moves.iter_mut().find(|m| m.id() == id)
    }

    fn settle_moves(&mut self) {
        for m in &mut self.moves {
            match m {
                Move::Thinking { streaming, .. } => *streaming = false,
                Move::ToolCall { status, .. } => *status = ToolCallStatus::Done,
            }
        }
    }
}
