//! The processing loop.
//!
//! Callers `write` / `flush` / `end` from the controlling thread; those calls
//! only enqueue and, when idle, dispatch one step. Step completions are picked
//! up by `poll` or `run_until_idle` on the same thread, which emit chunks,
//! advance the queue and fire callbacks.

use std::any::Any;
use std::mem;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use crossbeam::channel::{bounded, TryRecvError};
use log::{debug, trace, warn};

use crate::compression::{
    CodecError, CodecErrorKind, CodecOptions, CodecSession, Direction, FlushMode, SessionStats,
    ValidatedOptions,
};
use crate::engine::payload::coerce_payload;
use crate::engine::sink::{NoopSink, NotificationSink};
use crate::engine::types::{LoopState, SessionSlot, StepCompletion};
use crate::engine::worker::{default_pool, Executor};
use crate::queue::{CompletionCallback, Request, RequestQueue};
use crate::telemetry::{EngineCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::EngineError;

pub struct Engine {
    options: ValidatedOptions,
    session: SessionSlot,
    queue: RequestQueue,
    state: LoopState,
    flush_mode: FlushMode,
    ended: bool,
    need_drain: bool,
    poisoned: Option<CodecError>,
    /// What the failing request was told; `run_until_idle` reports the same.
    failure: Option<EngineError>,
    sink: Box<dyn NotificationSink>,
    executor: Arc<dyn Executor>,
    step_stage: Stage,
    counters: EngineCounters,
    timer: TelemetryTimer,
    final_stats: Option<SessionStats>,
}

impl Engine {
    /// Engine on the shared worker pool with no sink registered.
    pub fn new(options: CodecOptions) -> Result<Self, EngineError> {
        Self::with_executor(options, default_pool(), Box::new(NoopSink))
    }

    pub fn with_sink(options: CodecOptions, sink: Box<dyn NotificationSink>) -> Result<Self, EngineError> {
        Self::with_executor(options, default_pool(), sink)
    }

    /// # Errors
    /// - `InvalidLevel` / `InvalidStrategy` / `InvalidChunkSize`: nothing allocated.
    /// - `CodecInitFailed`: the codec session could not be set up.
    pub fn with_executor(
        options: CodecOptions,
        executor: Arc<dyn Executor>,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, EngineError> {
        let session = CodecSession::new(&options)?;
        let options = *session.options();
        let step_stage = match options.direction {
            Direction::Compress => Stage::Compress,
            Direction::Decompress => Stage::Decompress,
        };

        Ok(Self {
            options,
            session: SessionSlot::Resident(session),
            queue: RequestQueue::new(),
            state: LoopState::Idle,
            flush_mode: FlushMode::NoFlush,
            ended: false,
            need_drain: false,
            poisoned: None,
            failure: None,
            sink,
            executor,
            step_stage,
            counters: EngineCounters::default(),
            timer: TelemetryTimer::new(),
            final_stats: None,
        })
    }

    /// Register the notification sink. Meant to be called before the first write.
    pub fn set_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = sink;
    }

    // ---------------------------------------------------------------------
    // Caller operations
    // ---------------------------------------------------------------------

    /// Queue `payload` for processing. `None` queues an empty request.
    ///
    /// Returns `false` when more than one request is now pending; the caller
    /// should wait for `on_drain` before writing more. Never blocks.
    pub fn write(
        &mut self,
        payload: Option<Bytes>,
        on_complete: Option<CompletionCallback>,
    ) -> Result<bool, EngineError> {
        self.submit(payload, self.flush_mode, on_complete)
    }

    /// `write` for dynamically typed host values.
    pub fn write_any(
        &mut self,
        payload: Option<Box<dyn Any + Send>>,
        on_complete: Option<CompletionCallback>,
    ) -> Result<bool, EngineError> {
        self.check_writable()?;
        let payload = payload.map(coerce_payload).transpose()?;
        self.write(payload, on_complete)
    }

    /// Make everything written so far decodable without ending the stream.
    pub fn flush(&mut self, on_complete: Option<CompletionCallback>) -> Result<bool, EngineError> {
        self.submit(None, FlushMode::Sync, on_complete)
    }

    /// Like `flush`, and also reset the compression dictionary so output
    /// after this point decodes without anything before it.
    pub fn full_flush(&mut self, on_complete: Option<CompletionCallback>) -> Result<bool, EngineError> {
        self.submit(None, FlushMode::Full, on_complete)
    }

    /// Queue the final request and terminate the stream. Later writes fail
    /// with `WriteAfterEnd`.
    pub fn end(
        &mut self,
        payload: Option<Bytes>,
        on_complete: Option<CompletionCallback>,
    ) -> Result<bool, EngineError> {
        self.check_writable()?;
        self.flush_mode = FlushMode::Finish;
        let ready = self.submit(payload, self.flush_mode, on_complete)?;
        self.ended = true;
        Ok(ready)
    }

    // ---------------------------------------------------------------------
    // Driving the loop
    // ---------------------------------------------------------------------

    /// Handle every step completion that is already available. Never blocks.
    /// Returns the number of completions handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let received = match &self.state {
                LoopState::Idle => break,
                LoopState::Processing(rx) => rx.try_recv(),
            };
            match received {
                Ok(completion) => {
                    self.on_step_complete(completion);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.on_worker_lost();
                    break;
                }
            }
        }
        handled
    }

    /// Block until no step is in flight and the queue is empty.
    ///
    /// Returns the error the failing request received if processing stopped
    /// (`Codec` for a codec failure, `WorkerLost` if a step never came back).
    pub fn run_until_idle(&mut self) -> Result<(), EngineError> {
        loop {
            let received = match &self.state {
                LoopState::Idle => break,
                LoopState::Processing(rx) => rx.recv(),
            };
            match received {
                Ok(completion) => self.on_step_complete(completion),
                Err(_) => self.on_worker_lost(),
            }
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// The stream was ended and the codec session released.
    pub fn is_finished(&self) -> bool {
        self.ended && self.poisoned.is_none() && matches!(self.session, SessionSlot::Released)
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn needs_drain(&self) -> bool {
        self.need_drain
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_bytes(&self) -> usize {
        self.queue.pending_bytes()
    }

    pub fn options(&self) -> &ValidatedOptions {
        &self.options
    }

    /// Codec totals, available once the session has been released.
    pub fn final_stats(&self) -> Option<SessionStats> {
        self.final_stats
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn check_writable(&self) -> Result<(), EngineError> {
        if self.ended {
            return Err(EngineError::WriteAfterEnd);
        }
        if let Some(err) = &self.poisoned {
            return Err(EngineError::Poisoned(err.clone()));
        }
        Ok(())
    }

    fn submit(
        &mut self,
        payload: Option<Bytes>,
        flush: FlushMode,
        on_complete: Option<CompletionCallback>,
    ) -> Result<bool, EngineError> {
        self.check_writable()?;

        let request = Request::new(payload.unwrap_or_default(), flush, on_complete);
        let len = request.len();
        let depth = self.queue.enqueue(request);
        self.counters.add_enqueue(depth);

        let ready = depth == 1;
        if !ready {
            self.need_drain = true;
        }
        trace!("[ENGINE] enqueued {} bytes flush={:?} depth={}", len, flush, depth);

        if self.state.is_idle() {
            self.dispatch_head();
        }
        Ok(ready)
    }

    /// Move the session into one worker job for the head request.
    fn dispatch_head(&mut self) {
        let Some(head) = self.queue.peek_head() else {
            return;
        };
        let input = head.remaining();
        let flush = head.flush_mode();

        let mut session = match mem::replace(&mut self.session, SessionSlot::InFlight) {
            SessionSlot::Resident(session) => session,
            SessionSlot::InFlight | SessionSlot::Released => {
                unreachable!("codec step dispatched while the session is not resident")
            }
        };

        let (tx, rx) = bounded(1);
        self.state = LoopState::Processing(rx);
        self.executor.submit(Box::new(move || {
            let started = Instant::now();
            let outcome = session.step(&input, flush);
            let _ = tx.send(StepCompletion { session, outcome, elapsed: started.elapsed() });
        }));
    }

    fn on_step_complete(&mut self, completion: StepCompletion) {
        let StepCompletion { session, outcome, elapsed } = completion;
        self.state = LoopState::Idle;
        self.timer.add_stage_time(self.step_stage, elapsed);

        let progress = match outcome {
            Ok(progress) => progress,
            Err(err) => {
                self.session = SessionSlot::Resident(session);
                let head_error = EngineError::Codec(err.clone());
                return self.poison(err, head_error);
            }
        };
        self.counters.add_step(progress.consumed, progress.produced);

        if progress.produced > 0 {
            let started = Instant::now();
            self.sink.on_data(session.chunk(progress.produced));
            self.timer.add_stage_time(Stage::Emit, started.elapsed());
        }
        let output_full = progress.produced == session.capacity();
        self.session = SessionSlot::Resident(session);

        let Some(head) = self.queue.peek_head_mut() else {
            warn!("[ENGINE] step completed with no request queued");
            return self.advance();
        };
        head.advance(progress.consumed);
        let remaining = head.remaining_len();

        // Full output buffer: the codec may still hold output for this request.
        if output_full || (remaining > 0 && progress.made_progress()) {
            return self.dispatch_head();
        }
        if remaining > 0 {
            let err = CodecError::new(
                CodecErrorKind::Stalled,
                format!("codec made no progress with {remaining} input bytes pending"),
            );
            let head_error = EngineError::Codec(err.clone());
            return self.poison(err, head_error);
        }

        if let Some(request) = self.queue.pop_head() {
            self.counters.add_completed();
            request.complete(Ok(()));
        }
        self.advance();
    }

    /// Head request is done: start the next one, or go idle.
    fn advance(&mut self) {
        if !self.queue.is_empty() {
            return self.dispatch_head();
        }
        if self.need_drain {
            self.need_drain = false;
            self.counters.add_drain();
            debug!("[ENGINE] queue drained");
            self.sink.on_drain();
        }
        if self.ended {
            self.finalize();
        }
    }

    fn finalize(&mut self) {
        if let SessionSlot::Resident(session) = mem::replace(&mut self.session, SessionSlot::Released) {
            self.final_stats = Some(session.finalize());
            self.timer.finish();
            debug!("[ENGINE] stream finished");
            self.sink.on_end();
        }
    }

    /// Stop processing for good: fail the head with `head_error`, fail every
    /// request behind it without running it, release the codec.
    fn poison(&mut self, err: CodecError, head_error: EngineError) {
        warn!("[ENGINE] {err}; failing {} queued request(s)", self.queue.len());
        self.poisoned = Some(err.clone());
        self.failure = Some(head_error.clone());
        self.need_drain = false;

        if let SessionSlot::Resident(session) = mem::replace(&mut self.session, SessionSlot::Released) {
            self.final_stats = Some(session.finalize());
        }
        self.timer.finish();

        let mut failed = 0;
        if let Some(head) = self.queue.pop_head() {
            failed += 1;
            head.complete(Err(head_error));
        }
        while let Some(request) = self.queue.pop_head() {
            failed += 1;
            request.complete(Err(EngineError::Poisoned(err.clone())));
        }
        self.counters.add_failed(failed);
        self.sink.on_error(&err);
    }

    /// The in-flight job was dropped without reporting back; the session
    /// went with it.
    fn on_worker_lost(&mut self) {
        self.state = LoopState::Idle;
        self.session = SessionSlot::Released;
        let err = CodecError::new(CodecErrorKind::StreamState, "worker dropped an in-flight step");
        self.poison(err, EngineError::WorkerLost);
    }
}
