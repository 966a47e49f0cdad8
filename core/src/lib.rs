//! streamflate-core
//!
//! Streaming deflate/inflate engine with a write queue, backpressure and
//! off-thread codec steps.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod compression;
pub mod queue;
pub mod telemetry;

// Processing loop
pub mod engine;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{CodecError, CodecErrorKind, CodecOptions, Direction, FlushMode, Format};
    pub use crate::engine::{
        compress_all, decompress_all, CallbackSink, Engine, Executor, InlineExecutor, NotificationSink,
        WorkerPool,
    };
    pub use crate::queue::CompletionCallback;
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::EngineError;
}
