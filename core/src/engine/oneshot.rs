//! Whole-buffer helpers built on the same processing loop.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use std::sync::Arc;

use bytes::Bytes;

use crate::compression::{CodecOptions, Format};
use crate::engine::processing::Engine;
use crate::engine::sink::CallbackSink;
use crate::engine::worker::InlineExecutor;
use crate::types::EngineError;

/// Compress `data` in one call. `level` follows the streaming rules (-1..=9).
pub fn compress_all(data: &[u8], format: Format, level: i32) -> Result<Vec<u8>, EngineError> {
    transform_all(data, CodecOptions::compress(format).with_level(level))
}

/// Decompress a complete stream. Truncated input is an error.
pub fn decompress_all(data: &[u8], format: Format) -> Result<Vec<u8>, EngineError> {
    transform_all(data, CodecOptions::decompress(format))
}

fn transform_all(data: &[u8], options: CodecOptions) -> Result<Vec<u8>, EngineError> {
    let out = Rc::new(RefCell::new(Vec::with_capacity(data.len() / 2 + 64)));
    let collector = out.clone();
    let sink = CallbackSink::new().on_data(move |chunk| collector.borrow_mut().extend_from_slice(chunk));

    let mut engine = Engine::with_executor(options, Arc::new(InlineExecutor), Box::new(sink))?;
    engine.end(Some(Bytes::copy_from_slice(data)), None)?;
    engine.run_until_idle()?;

    let result = mem::take(&mut *out.borrow_mut());
    Ok(result)
}
