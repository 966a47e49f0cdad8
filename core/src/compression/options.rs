//! compression/options.rs
//! Caller-facing configuration and its validation.

use serde::{Deserialize, Serialize};

use crate::constants::{levels, strategies, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use crate::compression::types::{CompressionLevel, Direction, Format, Strategy};
use crate::types::EngineError;

/// Raw options as a caller (or a JSON config file) supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub level: i32,
    pub strategy: i32,
    pub format: Format,
    pub direction: Direction,
    pub chunk_size: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            level: levels::DEFAULT_COMPRESSION,
            strategy: strategies::DEFAULT_STRATEGY,
            format: Format::default(),
            direction: Direction::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CodecOptions {
    pub fn compress(format: Format) -> Self {
        Self { format, direction: Direction::Compress, ..Self::default() }
    }

    pub fn decompress(format: Format) -> Self {
        Self { format, direction: Direction::Decompress, ..Self::default() }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_strategy(mut self, strategy: i32) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidOptions(e.to_string()))
    }

    /// Reject out-of-range values before anything is allocated.
    pub fn validate(&self) -> Result<ValidatedOptions, EngineError> {
        let level = CompressionLevel::from_raw(self.level)
            .ok_or(EngineError::InvalidLevel { level: self.level })?;
        let strategy = Strategy::from_raw(self.strategy)
            .ok_or(EngineError::InvalidStrategy { strategy: self.strategy })?;
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(EngineError::InvalidChunkSize {
                size: self.chunk_size,
                min: MIN_CHUNK_SIZE,
                max: MAX_CHUNK_SIZE,
            });
        }
        Ok(ValidatedOptions {
            level,
            strategy,
            format: self.format,
            direction: self.direction,
            chunk_size: self.chunk_size,
        })
    }
}

/// Options that passed validation; immutable for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub level: CompressionLevel,
    pub strategy: Strategy,
    pub format: Format,
    pub direction: Direction,
    pub chunk_size: usize,
}
