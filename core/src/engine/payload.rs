//! Host-boundary payload coercion.
//!
//! Bindings hand over dynamically typed values; anything that is not a byte
//! buffer is rejected here, before a request is formed.

use std::any::Any;

use bytes::{Bytes, BytesMut};

use crate::types::EngineError;

pub fn coerce_payload(value: Box<dyn Any + Send>) -> Result<Bytes, EngineError> {
    let value = match value.downcast::<Bytes>() {
        Ok(b) => return Ok(*b),
        Err(v) => v,
    };
    let value = match value.downcast::<BytesMut>() {
        Ok(b) => return Ok(b.freeze()),
        Err(v) => v,
    };
    let value = match value.downcast::<Vec<u8>>() {
        Ok(v) => return Ok(Bytes::from(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<String>() {
        Ok(s) => return Ok(Bytes::from(*s)),
        Err(v) => v,
    };
    let value = match value.downcast::<&'static [u8]>() {
        Ok(s) => return Ok(Bytes::from_static(*s)),
        Err(v) => v,
    };
    match value.downcast::<&'static str>() {
        Ok(s) => Ok(Bytes::from_static(s.as_bytes())),
        Err(_) => Err(EngineError::InvalidInputType),
    }
}
