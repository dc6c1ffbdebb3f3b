//! Caseflow Stream - the agent turn streaming protocol.
//!
//! One call to a [`TurnProvider`] produces one assistant turn: an ordered,
//! finite sequence of [`TurnEvent`]s: plan/thinking deltas, a tool call
//! forming its arguments, the tool result, then the final answer text.
//! The consumer pulls events in strict emission order from a [`TurnStream`];
//! dropping the stream cancels the producer and every pending timed
//! suspension immediately.
//!
//! The bundled [`MockTurnProvider`] is intentionally UI-first: it emits
//! small, deterministically chunked deltas on a fixed cadence so a thread
//! renderer can exercise its forming/loading/streaming states without
//! calling external APIs.
//!
//! # Example
//!
//! ```rust
//! use caseflow_stream::{MockTurnProvider, Pacing, TurnEvent, TurnProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockTurnProvider::new().with_pacing(Pacing::instant());
//! let mut stream = provider.run_turn("optimize onboarding").await.unwrap();
//!
//! let first = stream.next_event().await.unwrap();
//! assert_eq!(first, TurnEvent::TurnStart);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod chunk;
mod error;
mod event;
mod mock;
mod provider;
mod stream;

pub use chunk::{StreamChunks, split_for_streaming};
pub use error::{StreamError, StreamResult};
pub use event::TurnEvent;
pub use mock::{MOCK_TOOL_NAME, MockTurnProvider, Pacing, plan_text, tool_input};
pub use provider::TurnProvider;
pub use stream::{TURN_CHANNEL_CAPACITY, TurnSender, TurnStream};
