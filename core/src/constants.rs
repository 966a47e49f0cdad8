/// Output chunk buffer size used when the caller does not pick one (16 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;
/// Smallest output chunk buffer the engine accepts.
pub const MIN_CHUNK_SIZE: usize = 64;
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Compression levels (zlib numbering).
pub mod levels {
    pub const NO_COMPRESSION: i32      = 0;
    pub const BEST_SPEED: i32          = 1;
    pub const BEST_COMPRESSION: i32    = 9;
    pub const DEFAULT_COMPRESSION: i32 = -1;

    /// Level actually applied when `DEFAULT_COMPRESSION` is requested.
    pub const DEFAULT_LEVEL: u32 = 6;
}

/// Compression strategy identifiers (zlib numbering).
pub mod strategies {
    pub const DEFAULT_STRATEGY: i32 = 0;
    pub const FILTERED: i32         = 1;
    pub const HUFFMAN_ONLY: i32     = 2;
    pub const RLE: i32              = 3;
    pub const FIXED: i32            = 4;
}
