//! telemetry/counters.rs
//! Mutable counters collected while the engine runs.
//!
//! Converted into an immutable `TelemetrySnapshot` on demand.
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCounters {
    pub requests_enqueued: u64,
    pub requests_completed: u64,
    pub requests_failed: u64,
    pub steps: u64,
    pub chunks_emitted: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub drains: u64,
    /// Deepest the request queue has been.
    pub peak_queue_depth: u64,
}

impl EngineCounters {
    /// Record one accepted write/end/flush; `depth` is the queue length after insert.
    pub fn add_enqueue(&mut self, depth: usize) {
        self.requests_enqueued += 1;
        self.peak_queue_depth = self.peak_queue_depth.max(depth as u64);
    }

    /// Record one finished codec step.
    ///
    /// - `consumed`: input bytes taken by the codec
    /// - `produced`: output bytes written to the chunk buffer
    pub fn add_step(&mut self, consumed: usize, produced: usize) {
        self.steps += 1;
        self.bytes_in += consumed as u64;
        self.bytes_out += produced as u64;
        if produced > 0 {
            self.chunks_emitted += 1;
        }
    }

    pub fn add_completed(&mut self) {
        self.requests_completed += 1;
    }

    pub fn add_failed(&mut self, count: usize) {
        self.requests_failed += count as u64;
    }

    pub fn add_drain(&mut self) {
        self.drains += 1;
    }
}
