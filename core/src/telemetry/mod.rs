//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for one engine.
//!
//! Notes:
//! - Counters are plain integers mutated only on the controlling thread.
//! - Step durations are measured on the worker and carried back with the
//!   completion, so no timer is shared across threads.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
