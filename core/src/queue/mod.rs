//! Pending write requests, strictly FIFO.
//!
//! The queue never fires callbacks itself; the processing loop pops the head
//! and only then completes it, so a completion always observes the queue
//! without its own request in it.

pub mod types;
pub mod request_queue;

pub use types::{CompletionCallback, Request};
pub use request_queue::RequestQueue;
