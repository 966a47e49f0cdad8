//! Inflate via flate2's low-level `Decompress` stream, one bounded step at a time.

use flate2::{Decompress, FlushDecompress};

use crate::compression::codecs::gzip::{HeaderParser, TrailerReader};
use crate::compression::types::{
    CodecError, CodecErrorKind, Format, FlushMode, Progress, StepStatus, StreamCodec,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Body,
    Trailer,
    Done,
}

pub struct InflateCodec {
    inner: Decompress,
    format: Format,
    phase: Phase,
    header: HeaderParser,
    trailer: TrailerReader,
    crc: crc32fast::Hasher,
    isize: u32,
}

impl InflateCodec {
    pub fn new(format: Format) -> Self {
        let phase = if format == Format::Gzip { Phase::Header } else { Phase::Body };
        Self {
            inner: Decompress::new(format == Format::Zlib),
            format,
            phase,
            header: HeaderParser::default(),
            trailer: TrailerReader::default(),
            crc: crc32fast::Hasher::new(),
            isize: 0,
        }
    }
}

impl StreamCodec for InflateCodec {
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<Progress, CodecError> {
        let mut consumed = 0;
        let mut produced = 0;

        loop {
            match self.phase {
                Phase::Header => {
                    let (used, complete) = self.header.feed(&input[consumed..])?;
                    consumed += used;
                    if !complete {
                        break;
                    }
                    self.phase = Phase::Body;
                }
                Phase::Body => {
                    if produced == output.len() {
                        break;
                    }
                    let before_in = self.inner.total_in();
                    let before_out = self.inner.total_out();
                    // Finish is never forwarded: a first-call finish asks the
                    // backend for a one-shot decode into a single buffer.
                    let status = self.inner.decompress(
                        &input[consumed..],
                        &mut output[produced..],
                        FlushDecompress::None,
                    )?;
                    let used = (self.inner.total_in() - before_in) as usize;
                    let written = (self.inner.total_out() - before_out) as usize;

                    if self.format == Format::Gzip {
                        self.crc.update(&output[produced..produced + written]);
                        self.isize = self.isize.wrapping_add(written as u32);
                    }
                    consumed += used;
                    produced += written;

                    if status != flate2::Status::StreamEnd {
                        break;
                    }
                    self.phase = if self.format == Format::Gzip { Phase::Trailer } else { Phase::Done };
                }
                Phase::Trailer => {
                    consumed += self.trailer.feed(&input[consumed..]);
                    if !self.trailer.is_complete() {
                        break;
                    }
                    self.trailer.verify(self.crc.clone().finalize(), self.isize)?;
                    self.phase = Phase::Done;
                }
                Phase::Done => {
                    // Anything after the end of the stream is ignored.
                    consumed = input.len();
                    break;
                }
            }
        }

        let exhausted = consumed == input.len() && produced < output.len();
        if flush == FlushMode::Finish && self.phase != Phase::Done && exhausted {
            return Err(CodecError::new(CodecErrorKind::Truncated, "unexpected end of file"));
        }

        let status = if self.phase == Phase::Done { StepStatus::StreamEnd } else { StepStatus::Continue };
        Ok(Progress { consumed, produced, status })
    }

    fn name(&self) -> &'static str {
        match self.format {
            Format::Zlib => "inflate",
            Format::Raw  => "inflate-raw",
            Format::Gzip => "gunzip",
        }
    }
}
