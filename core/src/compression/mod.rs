//! compression/mod.rs
//! Incremental deflate/inflate sessions.
//!
//! Notes:
//! - The block codec itself is flate2's low-level stream; this module only
//!   adds framing (gzip), validation and the bounded-step contract.
//! - A session owns its output chunk buffer; each step overwrites it.

pub mod constants;
pub mod types;
pub mod options;
pub mod registry;
pub mod codecs;
pub mod session;

pub use types::*;
pub use options::{CodecOptions, ValidatedOptions};
pub use registry::create_codec;
pub use session::{CodecSession, SessionStats};
