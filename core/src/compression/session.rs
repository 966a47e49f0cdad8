//! compression/session.rs
//! One codec stream plus the output chunk buffer it drains into.
//!
//! The session is a plain owned value. The engine moves it into the worker
//! job for the duration of a step and gets it back with the completion, so
//! at most one step can ever touch the codec state.

use log::{debug, trace};

use crate::compression::options::{CodecOptions, ValidatedOptions};
use crate::compression::registry::create_codec;
use crate::compression::types::{
    CodecError, Direction, FlushMode, Progress, Strategy, StreamCodec,
};
use crate::types::EngineError;

/// Totals reported when a session is finalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_in: u64,
    pub total_out: u64,
    pub steps: u64,
}

pub struct CodecSession {
    codec: Box<dyn StreamCodec + Send>,
    options: ValidatedOptions,
    output: Vec<u8>,
    stats: SessionStats,
}

impl CodecSession {
    /// Validate `options`, then allocate the chunk buffer and codec state.
    ///
    /// # Errors
    /// - `InvalidLevel` / `InvalidStrategy` / `InvalidChunkSize` before any allocation.
    /// - `CodecInitFailed` if the chunk buffer cannot be allocated.
    pub fn new(options: &CodecOptions) -> Result<Self, EngineError> {
        let options = options.validate()?;

        let mut output = Vec::new();
        output
            .try_reserve_exact(options.chunk_size)
            .map_err(|e| EngineError::CodecInitFailed { reason: e.to_string() })?;
        output.resize(options.chunk_size, 0);

        if options.direction == Direction::Compress && options.strategy != Strategy::Default {
            debug!(
                "[SESSION] strategy {:?} accepted; backend encodes with its default strategy",
                options.strategy
            );
        }

        let codec = create_codec(options.direction, options.format, options.level);
        debug!(
            "[SESSION] init {} level={} chunk_size={}",
            codec.name(),
            options.level.get(),
            options.chunk_size
        );

        Ok(Self { codec, options, output, stats: SessionStats::default() })
    }

    /// Run one bounded step. Produced bytes are in `chunk(progress.produced)`
    /// until the next step.
    pub fn step(&mut self, input: &[u8], flush: FlushMode) -> Result<Progress, CodecError> {
        let progress = self.codec.process(input, &mut self.output, flush)?;
        self.stats.total_in += progress.consumed as u64;
        self.stats.total_out += progress.produced as u64;
        self.stats.steps += 1;
        trace!(
            "[SESSION] step {}: in={}/{} out={} flush={:?} status={:?}",
            self.stats.steps,
            progress.consumed,
            input.len(),
            progress.produced,
            flush,
            progress.status
        );
        Ok(progress)
    }

    pub fn chunk(&self, produced: usize) -> &[u8] {
        &self.output[..produced]
    }

    pub fn capacity(&self) -> usize {
        self.output.len()
    }

    pub fn options(&self) -> &ValidatedOptions {
        &self.options
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Release the codec state. Consumes the session, so it runs once.
    pub fn finalize(self) -> SessionStats {
        debug!(
            "[SESSION] finalize {}: in={} out={} steps={}",
            self.codec.name(),
            self.stats.total_in,
            self.stats.total_out,
            self.stats.steps
        );
        self.stats
    }
}
