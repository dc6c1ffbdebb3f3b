//! Producer/consumer plumbing for one turn.
//!
//! The producer is an explicit spawned task emitting into a bounded
//! channel; the consumer holds a [`TurnStream`] owning the receiving end
//! and a cancellation guard. Every delay-before-next-event races the
//! cancellation token, so abandoning the stream (dropping it) halts all
//! pending timed suspensions immediately rather than letting the producer
//! keep emitting into a discarded consumer.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::trace;

use crate::error::{StreamError, StreamResult};
use crate::event::TurnEvent;

/// Bound of the per-turn event channel. Small on purpose: the consumer
/// pulls one event at a time and the producer paces itself anyway.
pub const TURN_CHANNEL_CAPACITY: usize = 16;

/// The producer's half of a turn: send events, pause between chunks.
///
/// Both operations race the turn's cancellation token and return
/// [`StreamError::Cancelled`] / [`StreamError::ChannelClosed`] once the
/// consumer is gone, which producers propagate with `?` to unwind.
pub struct TurnSender {
    tx: mpsc::Sender<TurnEvent>,
    cancel: CancellationToken,
}

impl TurnSender {
    /// Emit one event, in order.
    pub async fn send(&self, event: TurnEvent) -> StreamResult<()> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(StreamError::Cancelled),
            sent = self.tx.send(event) => sent.map_err(|_| StreamError::ChannelClosed),
        }
    }

    /// Suspend before the next event, cancellably.
    pub async fn pause(&self, delay: Duration) -> StreamResult<()> {
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(StreamError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }

    /// Whether the turn has been abandoned.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// The consumer's half of one turn: an ordered, finite event stream.
///
/// Dropping the stream cancels the producer task on every exit path; no
/// partial state is left pending. A `TurnStream` is not restartable; each
/// provider call yields a fresh one.
pub struct TurnStream {
    inner: ReceiverStream<TurnEvent>,
    _guard: DropGuard,
}

impl TurnStream {
    /// Spawn a producer task and return the consuming stream.
    ///
    /// The producer receives a [`TurnSender`] and runs until it finishes
    /// its script or a send/pause reports cancellation.
    pub fn spawn<F, Fut>(produce: F) -> Self
    where
        F: FnOnce(TurnSender) -> Fut,
        Fut: Future<Output = StreamResult<()>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(TURN_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let sender = TurnSender {
            tx,
            cancel: cancel.clone(),
        };

        let fut = produce(sender);
        tokio::spawn(async move {
            match fut.await {
                Ok(()) => trace!("turn producer finished"),
                Err(err) => trace!(reason = %err, "turn producer stopped early"),
            }
        });

        Self {
            inner: ReceiverStream::new(rx),
            _guard: cancel.drop_guard(),
        }
    }

    /// Pull the next event, or `None` once the turn is over.
    pub async fn next_event(&mut self) -> Option<TurnEvent> {
        use futures::StreamExt;
        self.inner.next().await
    }
}

impl Stream for TurnStream {
    type Item = TurnEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
