//! compression/codecs/mod.rs
//! Incremental codecs behind the `StreamCodec` seam.
//!
//! Each codec is driven one bounded step at a time: it never owns the output
//! buffer, it only reports how much input it took and how much output it wrote.

pub mod deflate;
pub mod gzip;
pub mod inflate;

pub use deflate::DeflateCodec;
pub use inflate::InflateCodec;
