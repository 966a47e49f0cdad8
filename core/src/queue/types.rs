use std::fmt;

use bytes::Bytes;

use crate::compression::FlushMode;
use crate::types::EngineError;

/// Invoked once when a request has been fully processed (or has failed).
pub type CompletionCallback = Box<dyn FnOnce(Result<(), EngineError>)>;

/// One write/end/flush call waiting to be pushed through the codec.
pub struct Request {
    payload: Bytes,
    offset: usize,
    flush_mode: FlushMode,
    on_complete: Option<CompletionCallback>,
}

impl Request {
    /// `flush_mode` is the engine's mode at the time the request is formed.
    pub fn new(payload: Bytes, flush_mode: FlushMode, on_complete: Option<CompletionCallback>) -> Self {
        Self { payload, offset: 0, flush_mode, on_complete }
    }

    /// Input the codec has not taken yet. Shares the caller's buffer.
    pub fn remaining(&self) -> Bytes {
        self.payload.slice(self.offset..)
    }

    pub fn remaining_len(&self) -> usize {
        self.payload.len() - self.offset
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn flush_mode(&self) -> FlushMode {
        self.flush_mode
    }

    /// Record that the codec consumed `n` more bytes.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining_len(), "advanced past end of request payload");
        self.offset = (self.offset + n).min(self.payload.len());
    }

    /// Fire the completion callback, if any.
    pub fn complete(self, result: Result<(), EngineError>) {
        if let Some(cb) = self.on_complete {
            cb(result);
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("len", &self.payload.len())
            .field("offset", &self.offset)
            .field("flush_mode", &self.flush_mode)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}
