//! compression/registry.rs
//! Codec factory: direction + format → boxed `StreamCodec`.

use crate::compression::codecs::{DeflateCodec, InflateCodec};
use crate::compression::types::{CompressionLevel, Direction, Format, StreamCodec};

pub fn create_codec(direction: Direction, format: Format, level: CompressionLevel)
    -> Box<dyn StreamCodec + Send>
{
    match direction {
        Direction::Compress   => Box::new(DeflateCodec::new(level, format)),
        Direction::Decompress => Box::new(InflateCodec::new(format)),
    }
}
