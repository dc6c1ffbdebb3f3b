//! Deterministic fixed-size text chunking.
//!
//! Long payloads (the thinking plan, tool-argument JSON, the final answer)
//! are split into fixed-size substrings with no word-boundary awareness.
//! Splitting is a pure function of `(text, max_chars)` with no randomness,
//! so the delta sequence for a given input is reproducible, and
//! concatenating all chunks reconstructs the input exactly.

use std::iter::FusedIterator;

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Chunks are sliced on `char` boundaries, so multi-byte text never
/// panics; the final chunk may be shorter. A `max_chars` of zero yields
/// nothing.
pub fn split_for_streaming(text: &str, max_chars: usize) -> StreamChunks<'_> {
    StreamChunks {
        rest: text,
        max_chars,
    }
}

/// Iterator over fixed-size chunks of a string.
#[derive(Debug, Clone)]
pub struct StreamChunks<'a> {
    rest: &'a str,
    max_chars: usize,
}

impl<'a> Iterator for StreamChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() || self.max_chars == 0 {
            return None;
        }
        let split_at = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map_or(self.rest.len(), |(byte_idx, _)| byte_idx);
        let (chunk, rest) = self.rest.split_at(split_at);
        self.rest = rest;
        Some(chunk)
    }
}

impl FusedIterator for StreamChunks<'_> {}
