use std::collections::VecDeque;

use super::types::Request;

/// FIFO of pending requests, owned by the processing loop.
#[derive(Debug, Default)]
pub struct RequestQueue {
    inner: VecDeque<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail and return the length after insertion.
    pub fn enqueue(&mut self, request: Request) -> usize {
        self.inner.push_back(request);
        self.inner.len()
    }

    pub fn peek_head(&self) -> Option<&Request> {
        self.inner.front()
    }

    pub fn peek_head_mut(&mut self) -> Option<&mut Request> {
        self.inner.front_mut()
    }

    /// Remove the head without completing it.
    pub fn pop_head(&mut self) -> Option<Request> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Input bytes not yet taken by the codec, across all requests.
    pub fn pending_bytes(&self) -> usize {
        self.inner.iter().map(Request::remaining_len).sum()
    }
}
