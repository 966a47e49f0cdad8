/// gzip (RFC 1952) framing constants.
pub mod gzip {
    pub const MAGIC: [u8; 2]        = [0x1f, 0x8b];
    pub const METHOD_DEFLATE: u8    = 8;
    /// Fixed part of the member header.
    pub const HEADER_LEN: usize     = 10;
    /// CRC32 + ISIZE.
    pub const TRAILER_LEN: usize    = 8;
    /// "unknown" operating system, keeps output byte-identical across hosts.
    pub const OS_UNKNOWN: u8        = 255;
    pub const XFL_BEST: u8          = 2;
    pub const XFL_FASTEST: u8       = 4;
}
