use std::time::Duration;

use crossbeam::channel::Receiver;

use crate::compression::{CodecError, CodecSession, Progress};

/// What a worker hands back after one step: the session itself (ownership
/// returns to the controlling thread) and the step outcome.
pub struct StepCompletion {
    pub session: CodecSession,
    pub outcome: Result<Progress, CodecError>,
    pub elapsed: Duration,
}

/// Processing loop state.
pub enum LoopState {
    /// No step in flight.
    Idle,
    /// Exactly one step in flight; its completion arrives on this channel.
    Processing(Receiver<StepCompletion>),
}

impl LoopState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoopState::Idle)
    }
}

/// Where the codec session currently lives.
pub(crate) enum SessionSlot {
    Resident(CodecSession),
    InFlight,
    Released,
}
