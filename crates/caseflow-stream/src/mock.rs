//! Mock turn provider.
//!
//! Intentionally UI-first: one thinking segment, one `web_search` tool
//! call, a canned result, a short final answer, all emitted as small deltas on
//! a fixed cadence so a thread renderer can exercise its forming/loading/
//! streaming states without calling external APIs. Happy-path only: the
//! mock never emits [`TurnEvent::Error`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::chunk::split_for_streaming;
use crate::error::StreamResult;
use crate::event::TurnEvent;
use crate::provider::TurnProvider;
use crate::stream::{TurnSender, TurnStream};

/// Tool name used by the mock's single tool call.
pub const MOCK_TOOL_NAME: &str = "web_search";

/// Chunk sizes and inter-event delays, independent per segment type.
///
/// These govern perceived typing speed only; chunk contents are a pure
/// function of the text and chunk size.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Chunk size for the thinking plan text.
    pub plan_chunk: usize,
    /// Delay before each plan chunk.
    pub plan_delay: Duration,
    /// Chunk size for the tool-argument JSON.
    pub args_chunk: usize,
    /// Delay before each argument chunk.
    pub args_delay: Duration,
    /// Pause simulating tool execution, before the result event.
    pub result_delay: Duration,
    /// Chunk size for the final answer.
    pub answer_chunk: usize,
    /// Delay before each answer chunk.
    pub answer_delay: Duration,
}

impl Pacing {
    /// All delays zero. Chunking is unchanged; useful for tests that
    /// assert on event content and order without waiting.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            plan_delay: Duration::ZERO,
            args_delay: Duration::ZERO,
            result_delay: Duration::ZERO,
            answer_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            plan_chunk: 18,
            plan_delay: Duration::from_millis(55),
            args_chunk: 22,
            args_delay: Duration::from_millis(45),
            result_delay: Duration::from_millis(420),
            answer_chunk: 10,
            answer_delay: Duration::from_millis(38),
        }
    }
}

/// Mock implementation of [`TurnProvider`].
#[derive(Debug, Clone, Default)]
pub struct MockTurnProvider {
    pacing: Pacing,
}

impl MockTurnProvider {
    /// Create a mock provider with default pacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

#[async_trait]
impl TurnProvider for MockTurnProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run_turn(&self, user_text: &str) -> StreamResult<TurnStream> {
        let pacing = self.pacing;
        let user_text = user_text.to_string();
        Ok(TurnStream::spawn(move |sender| {
            run_script(sender, user_text, pacing)
        }))
    }
}

/// Fresh per-turn segment id.
fn segment_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// The thinking plan for a turn.
#[must_use]
pub fn plan_text(user_text: &str) -> String {
    format!(
        "Plan:\n\
         - Understand the request\n\
         - Search context\n\
         - Run tools\n\
         - Summarize\n\n\
         User asked: \u{201c}{user_text}\u{201d}\n"
    )
}

/// Structured arguments for the mock tool call.
#[must_use]
pub fn tool_input(user_text: &str) -> Value {
    json!({
        "queries": [
            format!("best practices {user_text}"),
            format!("examples of {user_text}"),
            format!("edge cases for {user_text}"),
        ],
    })
}

fn tool_result_preview() -> String {
    let results = json!({
        "results": [
            {
                "title": "Example result A",
                "snippet": "High-level guidance and implementation notes\u{2026}",
            },
            {
                "title": "Example result B",
                "snippet": "Tradeoffs, pitfalls, and alternatives\u{2026}",
            },
        ],
    });
    let mut preview = serde_json::to_string_pretty(&results).unwrap_or_default();
    preview.push('\n');
    preview
}

fn final_answer() -> String {
    "Here\u{2019}s what I\u{2019}d do next:\n\n\
     1) Start with a clean data model for moves and tool calls.\n\
     2) Stream deltas into UI segments for a great \u{201c}live\u{201d} feel.\n\
     3) Keep tool calls compact by default, expandable on demand.\n\n\
     When you\u{2019}re ready, we can swap this mock stream for a live backend.\n"
        .to_string()
}

/// Emit one complete scripted turn.
async fn run_script(sender: TurnSender, user_text: String, pacing: Pacing) -> StreamResult<()> {
    let thinking_id = segment_id("thinking");
    let tool_id = segment_id("tool");

    sender.send(TurnEvent::TurnStart).await?;

    // Thinking
    sender
        .send(TurnEvent::ThinkingStart {
            id: thinking_id.clone(),
        })
        .await?;

    let thought = plan_text(&user_text);
    for chunk in split_for_streaming(&thought, pacing.plan_chunk) {
        sender.pause(pacing.plan_delay).await?;
        sender
            .send(TurnEvent::ThinkingDelta {
                id: thinking_id.clone(),
                delta: chunk.to_string(),
            })
            .await?;
    }

    sender
        .send(TurnEvent::ThinkingEnd {
            id: thinking_id,
            thought,
        })
        .await?;

    // Tool call (forming args)
    sender
        .send(TurnEvent::ToolStart {
            id: tool_id.clone(),
            name: MOCK_TOOL_NAME.to_string(),
        })
        .await?;

    let input = tool_input(&user_text);
    let args_json = serde_json::to_string_pretty(&input).unwrap_or_default();
    for chunk in split_for_streaming(&args_json, pacing.args_chunk) {
        sender.pause(pacing.args_delay).await?;
        sender
            .send(TurnEvent::ToolDelta {
                id: tool_id.clone(),
                delta: chunk.to_string(),
            })
            .await?;
    }

    sender
        .send(TurnEvent::ToolEnd {
            id: tool_id.clone(),
            name: MOCK_TOOL_NAME.to_string(),
            input,
        })
        .await?;

    // Tool execution result
    sender.pause(pacing.result_delay).await?;
    sender
        .send(TurnEvent::ToolResult {
            id: tool_id,
            name: MOCK_TOOL_NAME.to_string(),
            result: tool_result_preview(),
        })
        .await?;

    // Final message
    let final_text = final_answer();
    for chunk in split_for_streaming(&final_text, pacing.answer_chunk) {
        sender.pause(pacing.answer_delay).await?;
        sender
            .send(TurnEvent::TextDelta {
                delta: chunk.to_string(),
            })
            .await?;
    }

    sender
        .send(TurnEvent::TurnEnd {
            final_text,
            move_count: 2,
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn collect_turn(user_text: &str) -> Vec<TurnEvent> {
        let provider = MockTurnProvider::new().with_pacing(Pacing::instant());
        let mut stream = provider.run_turn(user_text).await.unwrap();
        let mut events = Vec::new();
        while let Some(event) = stream.next_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn turn_is_bracketed_by_start_and_end() {
        let events = collect_turn("optimize onboarding").await;
        assert_eq!(events.first(), Some(&TurnEvent::TurnStart));
        assert!(matches!(events.last(), Some(TurnEvent::TurnEnd { .. })));
        let starts = events.iter().filter(|e| **e == TurnEvent::TurnStart).count();
        let ends = events
            .iter()
            .filter(|e| matches!(e, TurnEvent::TurnEnd { .. }))
            .count();
        assert_eq!((starts, ends), (1, 1));
    }

    #[tokio::test]
    async fn every_delta_id_matches_a_prior_start() {
        let events = collect_turn("triage maintenance requests").await;
        let mut open: HashSet<String> = HashSet::new();
        for event in &events {
            match event {
                TurnEvent::ThinkingStart { id } | TurnEvent::ToolStart { id, .. } => {
                    assert!(open.insert(id.clone()), "duplicate segment id");
                },
                TurnEvent::ThinkingDelta { id, .. } | TurnEvent::ToolDelta { id, .. } => {
                    assert!(open.contains(id), "delta before its start");
                },
                _ => {},
            }
        }
        assert_eq!(open.len(), 2);
    }

    #[tokio::test]
    async fn first_thinking_delta_is_first_18_chars_of_plan() {
        let events = collect_turn("optimize onboarding").await;
        let expected: String = plan_text("optimize onboarding").chars().take(18).collect();
        let first_delta = events
            .iter()
            .find_map(|e| match e {
                TurnEvent::ThinkingDelta { delta, .. } => Some(delta.clone()),
                _ => None,
            })
            .expect("no thinking delta emitted");
        assert_eq!(first_delta, expected);
    }

    #[tokio::test]
    async fn thinking_deltas_reassemble_the_thought() {
        let events = collect_turn("optimize onboarding").await;
        let rebuilt: String = events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::ThinkingDelta { delta, .. } => Some(delta.as_str()),
                _ => None,
            })
            .collect();
        let thought = events
            .iter()
            .find_map(|e| match e {
                TurnEvent::ThinkingEnd { thought, .. } => Some(thought.clone()),
                _ => None,
            })
            .expect("no thinking end");
        assert_eq!(rebuilt, thought);
    }

    #[tokio::test]
    async fn tool_result_follows_tool_end_and_reports_two_moves() {
        let events = collect_turn("handle water leaks").await;
        let end_idx = events
            .iter()
            .position(|e| matches!(e, TurnEvent::ToolEnd { .. }))
            .expect("no tool end");
        let result_idx = events
            .iter()
            .position(|e| matches!(e, TurnEvent::ToolResult { .. }))
            .expect("no tool result");
        assert!(result_idx > end_idx);

        match events.last() {
            Some(TurnEvent::TurnEnd {
                final_text,
                move_count,
            }) => {
                assert_eq!(*move_count, 2);
                assert!(final_text.contains("clean data model"));
            },
            other => panic!("unexpected final event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_args_json_derives_from_user_text() {
        let events = collect_turn("optimize onboarding").await;
        let input = events
            .iter()
            .find_map(|e| match e {
                TurnEvent::ToolEnd { input, .. } => Some(input.clone()),
                _ => None,
            })
            .expect("no tool end");
        assert_eq!(input["queries"][0], "best practices optimize onboarding");

        // The streamed argument deltas reassemble the pretty-printed input.
        let rebuilt: String = events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::ToolDelta { delta, .. } => Some(delta.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rebuilt, serde_json::to_string_pretty(&input).unwrap());
    }

    #[tokio::test]
    async fn turns_are_independent() {
        let provider = MockTurnProvider::new().with_pacing(Pacing::instant());
        let mut a = provider.run_turn("first").await.unwrap();
        let mut b = provider.run_turn("second").await.unwrap();

        // Both streams start fresh.
        assert_eq!(a.next_event().await, Some(TurnEvent::TurnStart));
        assert_eq!(b.next_event().await, Some(TurnEvent::TurnStart));
    }
}
