//! Turn provider trait.
//!
//! Defines the interface a thread backend must implement. The mock
//! provider ships in this crate; a live backend substitutes here and uses
//! [`TurnEvent::Error`](crate::TurnEvent::Error) for abnormal turn ends.

use async_trait::async_trait;

use crate::error::StreamResult;
use crate::stream::TurnStream;

/// A source of agent turns.
///
/// Each [`run_turn`](TurnProvider::run_turn) call is an independent turn:
/// restartable per call, never restartable mid-stream.
#[async_trait]
pub trait TurnProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Start one turn for the given user text.
    ///
    /// Returns the ordered event stream for the turn.
    async fn run_turn(&self, user_text: &str) -> StreamResult<TurnStream>;
}

/// Blanket implementation allowing `Box<dyn TurnProvider>` to be used as
/// a type parameter wherever `P: TurnProvider` is required.
#[async_trait]
impl TurnProvider for Box<dyn TurnProvider> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn run_turn(&self, user_text: &str) -> StreamResult<TurnStream> {
        (**self).run_turn(user_text).await
    }
}
