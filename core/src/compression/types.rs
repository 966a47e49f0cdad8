//! compression/types.rs
//! Codec-facing types: direction, framing, flush modes, validated level and
//! strategy, step progress and the codec error domain.

use std::fmt;

use flate2::{Compression, FlushCompress};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{levels, strategies};

/// Which way the codec transforms bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Compress,
    Decompress,
}

/// Container around the raw deflate bitstream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// RFC 1950: 2-byte header + adler32 trailer.
    #[default]
    Zlib,
    /// RFC 1951: no header, no checksum.
    Raw,
    /// RFC 1952: gzip member header + CRC32/ISIZE trailer.
    Gzip,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Zlib => "zlib",
            Format::Raw  => "raw",
            Format::Gzip => "gzip",
        }
    }
}

/// How much buffered state the codec must push out on a step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FlushMode {
    /// Hold back output until more input arrives.
    #[default]
    NoFlush,
    /// Emit everything so far, aligned to a byte boundary.
    Sync,
    /// Like `Sync`, and reset the dictionary.
    Full,
    /// Emit everything and terminate the stream.
    Finish,
}

impl From<FlushMode> for FlushCompress {
    fn from(mode: FlushMode) -> Self {
        match mode {
            FlushMode::NoFlush => FlushCompress::None,
            FlushMode::Sync    => FlushCompress::Sync,
            FlushMode::Full    => FlushCompress::Full,
            FlushMode::Finish  => FlushCompress::Finish,
        }
    }
}

/// FFI-safe enum for zlib strategy identifiers.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum Strategy {
    Default     = strategies::DEFAULT_STRATEGY,
    Filtered    = strategies::FILTERED,
    HuffmanOnly = strategies::HUFFMAN_ONLY,
    Rle         = strategies::RLE,
    Fixed       = strategies::FIXED,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Default
    }
}

impl Strategy {
    pub fn from_raw(raw: i32) -> Option<Self> {
        Strategy::try_from_primitive(raw).ok()
    }
}

/// A compression level already checked against the supported range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// `-1` resolves to the default level, `0..=9` pass through, anything
    /// else is rejected.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            levels::DEFAULT_COMPRESSION => Some(Self(levels::DEFAULT_LEVEL)),
            levels::NO_COMPRESSION..=levels::BEST_COMPRESSION => Some(Self(raw as u32)),
            _ => None,
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn to_flate2(self) -> Compression {
        Compression::new(self.0)
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(levels::DEFAULT_LEVEL)
    }
}

/// Whether the codec can keep going or the stream is complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Continue,
    StreamEnd,
}

/// Result of one bounded codec step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub consumed: usize,
    pub produced: usize,
    pub status: StepStatus,
}

impl Progress {
    pub fn made_progress(&self) -> bool {
        self.consumed > 0 || self.produced > 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// Codec state is inconsistent (misuse or internal corruption).
    StreamState,
    /// Input is not a valid stream, or a checksum does not match.
    Data,
    /// Allocation failed.
    Memory,
    /// Input ended before the stream did.
    Truncated,
    /// Input remains but the codec refused to consume or produce anything.
    Stalled,
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecErrorKind::StreamState => "stream state",
            CodecErrorKind::Data        => "data",
            CodecErrorKind::Memory      => "memory",
            CodecErrorKind::Truncated   => "truncated input",
            CodecErrorKind::Stalled     => "stalled stream",
        };
        f.write_str(name)
    }
}

/// Failure reported by the codec during a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct CodecError {
    pub kind: CodecErrorKind,
    pub message: String,
}

impl CodecError {
    pub fn new(kind: CodecErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(CodecErrorKind::Data, message)
    }

    pub fn kind(&self) -> CodecErrorKind {
        self.kind
    }
}

impl From<flate2::CompressError> for CodecError {
    fn from(e: flate2::CompressError) -> Self {
        CodecError::new(CodecErrorKind::StreamState, e.to_string())
    }
}

impl From<flate2::DecompressError> for CodecError {
    fn from(e: flate2::DecompressError) -> Self {
        CodecError::new(CodecErrorKind::Data, e.to_string())
    }
}

// Require Send so codecs can ride along with the session into a worker.
pub trait StreamCodec: Send {
    /// Feed up to `input.len()` bytes and write up to `output.len()` bytes.
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<Progress, CodecError>;

    /// Short codec name for logs.
    fn name(&self) -> &'static str;
}
