//! gzip (RFC 1952) member framing around a raw deflate stream.
//!
//! The deflate codec writes the header before the first compressed byte and
//! the CRC32/ISIZE trailer after the stream ends; the inflate codec parses the
//! header incrementally (the optional fields make it variable-length) and
//! verifies the trailer once the deflate body is done.

use bitflags::bitflags;
use byteorder::{ByteOrder, LittleEndian};

use crate::compression::constants::gzip::*;
use crate::compression::types::{CodecError, CompressionLevel};

bitflags! {
    /// Header FLG byte.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct GzipFlags: u8 {
        const FTEXT    = 0x01;
        const FHCRC    = 0x02;
        const FEXTRA   = 0x04;
        const FNAME    = 0x08;
        const FCOMMENT = 0x10;
    }
}

const RESERVED_FLAGS: u8 = 0xe0;

/// Fixed 10-byte header with no optional fields and a zero mtime.
pub fn encode_header(level: CompressionLevel) -> [u8; HEADER_LEN] {
    let xfl = match level.get() {
        9 => XFL_BEST,
        0 | 1 => XFL_FASTEST,
        _ => 0,
    };
    [
        MAGIC[0], MAGIC[1], METHOD_DEFLATE, 0,
        0, 0, 0, 0,
        xfl, OS_UNKNOWN,
    ]
}

pub fn encode_trailer(crc: u32, isize: u32) -> [u8; TRAILER_LEN] {
    let mut out = [0u8; TRAILER_LEN];
    LittleEndian::write_u32(&mut out[0..4], crc);
    LittleEndian::write_u32(&mut out[4..8], isize);
    out
}

/// Length of the complete header at the front of `buf`, or `None` if more
/// bytes are needed to tell.
pub fn header_len(buf: &[u8]) -> Result<Option<usize>, CodecError> {
    let mut parser = HeaderParser::default();
    let (used, complete) = parser.feed(buf)?;
    Ok(complete.then_some(used))
}

/// Header fields in wire order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HeaderState {
    #[default]
    Fixed,
    ExtraLen,
    Extra,
    Name,
    Comment,
    HeaderCrc,
    Done,
}

/// Streaming header parser. Holds only the fixed 10 bytes and a two-byte
/// field buffer; FEXTRA payload and the NUL-terminated strings are skipped
/// as they arrive, so memory stays constant whatever their length.
#[derive(Debug, Default)]
pub struct HeaderParser {
    state: HeaderState,
    fixed: [u8; HEADER_LEN],
    field: [u8; 2],
    filled: usize,
    flags: GzipFlags,
    extra_left: usize,
    crc: crc32fast::Hasher,
}

impl HeaderParser {
    /// Returns how many bytes of `input` belong to the header and whether the
    /// header is now complete.
    pub fn feed(&mut self, input: &[u8]) -> Result<(usize, bool), CodecError> {
        let mut used = 0;
        loop {
            let rest = &input[used..];
            match self.state {
                HeaderState::Fixed => {
                    let take = (HEADER_LEN - self.filled).min(rest.len());
                    self.fixed[self.filled..self.filled + take].copy_from_slice(&rest[..take]);
                    self.filled += take;
                    used += take;

                    let magic_seen = self.filled.min(MAGIC.len());
                    if self.fixed[..magic_seen] != MAGIC[..magic_seen] {
                        return Err(CodecError::data("incorrect gzip header check"));
                    }
                    if self.filled < HEADER_LEN {
                        return Ok((used, false));
                    }
                    if self.fixed[2] != METHOD_DEFLATE {
                        return Err(CodecError::data(format!(
                            "unknown compression method: {}",
                            self.fixed[2]
                        )));
                    }
                    if self.fixed[3] & RESERVED_FLAGS != 0 {
                        return Err(CodecError::data("reserved gzip header flags set"));
                    }
                    self.flags = GzipFlags::from_bits_truncate(self.fixed[3]);
                    self.crc.update(&self.fixed);
                    self.filled = 0;
                    self.state = self.next_state();
                }
                HeaderState::ExtraLen | HeaderState::HeaderCrc => {
                    let take = (2 - self.filled).min(rest.len());
                    self.field[self.filled..self.filled + take].copy_from_slice(&rest[..take]);
                    self.filled += take;
                    used += take;
                    if self.filled < 2 {
                        return Ok((used, false));
                    }
                    self.filled = 0;

                    if self.state == HeaderState::ExtraLen {
                        self.crc.update(&self.field);
                        self.extra_left = LittleEndian::read_u16(&self.field) as usize;
                        self.state = HeaderState::Extra;
                    } else {
                        let expected = LittleEndian::read_u16(&self.field);
                        let actual = (self.crc.clone().finalize() & 0xffff) as u16;
                        if expected != actual {
                            return Err(CodecError::data("gzip header crc mismatch"));
                        }
                        self.state = HeaderState::Done;
                    }
                }
                HeaderState::Extra => {
                    let take = self.extra_left.min(rest.len());
                    self.crc.update(&rest[..take]);
                    self.extra_left -= take;
                    used += take;
                    if self.extra_left > 0 {
                        return Ok((used, false));
                    }
                    self.state = self.next_state();
                }
                HeaderState::Name | HeaderState::Comment => match rest.iter().position(|&b| b == 0) {
                    Some(nul) => {
                        self.crc.update(&rest[..=nul]);
                        used += nul + 1;
                        self.state = self.next_state();
                    }
                    None => {
                        self.crc.update(rest);
                        return Ok((input.len(), false));
                    }
                },
                HeaderState::Done => return Ok((used, true)),
            }
        }
    }

    /// First optional field after the current one that the flags announce.
    fn next_state(&self) -> HeaderState {
        [
            (HeaderState::ExtraLen, GzipFlags::FEXTRA),
            (HeaderState::Name, GzipFlags::FNAME),
            (HeaderState::Comment, GzipFlags::FCOMMENT),
            (HeaderState::HeaderCrc, GzipFlags::FHCRC),
        ]
        .into_iter()
        .find(|(state, flag)| *state > self.state && self.flags.contains(*flag))
        .map_or(HeaderState::Done, |(state, _)| state)
    }
}

/// Collects the 8 trailer bytes, which may straddle steps.
#[derive(Debug, Default)]
pub struct TrailerReader {
    buf: [u8; TRAILER_LEN],
    filled: usize,
}

impl TrailerReader {
    pub fn feed(&mut self, input: &[u8]) -> usize {
        let take = (TRAILER_LEN - self.filled).min(input.len());
        self.buf[self.filled..self.filled + take].copy_from_slice(&input[..take]);
        self.filled += take;
        take
    }

    pub fn is_complete(&self) -> bool {
        self.filled == TRAILER_LEN
    }

    /// Check the trailer against the CRC32 and length of the inflated data.
    pub fn verify(&self, crc: u32, isize: u32) -> Result<(), CodecError> {
        let expected_crc = LittleEndian::read_u32(&self.buf[0..4]);
        let expected_len = LittleEndian::read_u32(&self.buf[4..8]);
        if expected_crc != crc {
            return Err(CodecError::data(format!(
                "gzip crc mismatch: trailer {:08x}, computed {:08x}",
                expected_crc, crc
            )));
        }
        if expected_len != isize {
            return Err(CodecError::data(format!(
                "gzip length mismatch: trailer {}, computed {}",
                expected_len, isize
            )));
        }
        Ok(())
    }
}

/// Framing bytes waiting for room in the output chunk buffer.
#[derive(Debug, Default)]
pub struct PendingBytes {
    buf: Vec<u8>,
    pos: usize,
}

impl PendingBytes {
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let n = (self.buf.len() - self.pos).min(out.len());
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        if self.is_empty() {
            self.buf.clear();
            self.pos = 0;
        }
        n
    }
}
