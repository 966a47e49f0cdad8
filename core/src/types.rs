use thiserror::Error;

use crate::compression::CodecError;

/// Unified engine error covering configuration, caller misuse and codec failure.
/// - Synchronous variants are returned by the call that caused them.
/// - `Codec` / `Poisoned` also arrive through request completion callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid compression level {level}: expected -1..=9")]
    InvalidLevel { level: i32 },

    #[error("invalid compression strategy {strategy}: expected 0..=4")]
    InvalidStrategy { strategy: i32 },

    #[error("invalid chunk size {size}: expected {min}..={max}")]
    InvalidChunkSize { size: usize, min: usize, max: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("codec init failed: {reason}")]
    CodecInitFailed { reason: String },

    #[error("write after end")]
    WriteAfterEnd,

    #[error("invalid input type: expected a byte buffer")]
    InvalidInputType,

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// An earlier request hit a codec error; the stream cannot continue.
    #[error("engine poisoned by earlier failure: {0}")]
    Poisoned(CodecError),

    #[error("worker dropped an in-flight codec step")]
    WorkerLost,
}
