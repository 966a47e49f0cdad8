//! Notification surface the processing loop reports into.
//!
//! Every method has a no-op default, so an engine without a registered sink
//! simply discards its events.

use crate::compression::CodecError;

pub trait NotificationSink {
    /// One output chunk. The slice is the engine's reusable chunk buffer and
    /// is overwritten by the next step; copy it if it must outlive the call.
    fn on_data(&mut self, _chunk: &[u8]) {}

    /// The queue emptied after a write returned `false`.
    fn on_drain(&mut self) {}

    /// The stream was ended, fully flushed, and the codec released.
    fn on_end(&mut self) {}

    /// A step failed; the engine is poisoned.
    fn on_error(&mut self, _err: &CodecError) {}
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {}

type DataFn = Box<dyn FnMut(&[u8])>;
type EventFn = Box<dyn FnMut()>;
type ErrorFn = Box<dyn FnMut(&CodecError)>;

/// Sink with one optional closure slot per event.
#[derive(Default)]
pub struct CallbackSink {
    data: Option<DataFn>,
    drain: Option<EventFn>,
    end: Option<EventFn>,
    error: Option<ErrorFn>,
}

impl CallbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_data(mut self, f: impl FnMut(&[u8]) + 'static) -> Self {
        self.data = Some(Box::new(f));
        self
    }

    pub fn on_drain(mut self, f: impl FnMut() + 'static) -> Self {
        self.drain = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&CodecError) + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl NotificationSink for CallbackSink {
    fn on_data(&mut self, chunk: &[u8]) {
        if let Some(f) = self.data.as_mut() {
            f(chunk);
        }
    }

    fn on_drain(&mut self) {
        if let Some(f) = self.drain.as_mut() {
            f();
        }
    }

    fn on_end(&mut self) {
        if let Some(f) = self.end.as_mut() {
            f();
        }
    }

    fn on_error(&mut self, err: &CodecError) {
        if let Some(f) = self.error.as_mut() {
            f(err);
        }
    }
}
