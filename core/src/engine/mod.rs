//! engine/mod.rs
//! Streaming engine: request queue + single-flight codec steps + sink.
//!
//! Notes:
//! - Everything caller-visible happens on the controlling thread.
//! - Workers only ever run `CodecSession::step` on a session moved to them.

pub mod oneshot;
pub mod payload;
pub mod processing;
pub mod sink;
pub mod types;
pub mod worker;

pub use oneshot::{compress_all, decompress_all};
pub use payload::coerce_payload;
pub use processing::Engine;
pub use sink::{CallbackSink, NoopSink, NotificationSink};
pub use types::{LoopState, StepCompletion};
pub use worker::{default_pool, default_worker_count, Executor, InlineExecutor, Job, WorkerPool};
