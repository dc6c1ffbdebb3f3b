//! Caseflow Thread - render-side consumer for agent turn streams.
//!
//! Folds a [`TurnEvent`](caseflow_stream::TurnEvent) sequence into the
//! aggregates a thread view renders: collapsible **moves** (thinking
//! blocks and tool calls) and the streamed final answer. Collapse state is
//! UI-local and lives here, not in the protocol.
//!
//! The consumer is forward-compatible: unrecognized events are ignored,
//! and deltas whose segment id was never opened are dropped rather than
//! crashing the fold.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod moves;
mod turn;

pub use moves::{Move, ToolCallStatus};
pub use turn::TurnView;
