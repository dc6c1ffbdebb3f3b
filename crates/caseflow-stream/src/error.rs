//! Stream-related error types.

use thiserror::Error;

/// Errors that can occur while producing or consuming a turn stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The provider could not start a turn.
    #[error("turn provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The consumer dropped its end of the stream; the producer's only
    /// obligation is to stop emitting.
    #[error("turn stream closed by consumer")]
    ChannelClosed,

    /// The turn was cancelled via its cancellation token.
    #[error("turn cancelled")]
    Cancelled,
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;
