//! Deflate via flate2's low-level `Compress` stream, one bounded step at a time.

use flate2::Compress;

use crate::compression::codecs::gzip::{self, PendingBytes};
use crate::compression::types::{
    CodecError, CompressionLevel, Format, FlushMode, Progress, StepStatus, StreamCodec,
};

pub struct DeflateCodec {
    inner: Compress,
    format: Format,
    /// gzip header/trailer bytes not yet copied into an output chunk.
    pending: PendingBytes,
    crc: crc32fast::Hasher,
    isize: u32,
    finished: bool,
}

impl DeflateCodec {
    pub fn new(level: CompressionLevel, format: Format) -> Self {
        // gzip wraps a headerless stream; the framing is written here.
        let inner = Compress::new(level.to_flate2(), format == Format::Zlib);
        let mut pending = PendingBytes::default();
        if format == Format::Gzip {
            pending.push(&gzip::encode_header(level));
        }
        Self {
            inner,
            format,
            pending,
            crc: crc32fast::Hasher::new(),
            isize: 0,
            finished: false,
        }
    }

    fn status(&self) -> StepStatus {
        if self.finished && self.pending.is_empty() {
            StepStatus::StreamEnd
        } else {
            StepStatus::Continue
        }
    }
}

impl StreamCodec for DeflateCodec {
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<Progress, CodecError> {
        let mut produced = self.pending.drain_into(output);
        if self.finished || produced == output.len() {
            return Ok(Progress { consumed: 0, produced, status: self.status() });
        }

        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self.inner.compress(input, &mut output[produced..], flush.into())?;
        let consumed = (self.inner.total_in() - before_in) as usize;
        produced += (self.inner.total_out() - before_out) as usize;

        if self.format == Format::Gzip {
            self.crc.update(&input[..consumed]);
            self.isize = self.isize.wrapping_add(consumed as u32);
        }

        if status == flate2::Status::StreamEnd {
            self.finished = true;
            if self.format == Format::Gzip {
                let crc = self.crc.clone().finalize();
                self.pending.push(&gzip::encode_trailer(crc, self.isize));
                produced += self.pending.drain_into(&mut output[produced..]);
            }
        }

        Ok(Progress { consumed, produced, status: self.status() })
    }

    fn name(&self) -> &'static str {
        match self.format {
            Format::Zlib => "deflate",
            Format::Raw  => "deflate-raw",
            Format::Gzip => "gzip",
        }
    }
}
