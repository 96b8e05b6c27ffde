//! Recording-cycle state machine

mod last_recording;
mod phase;

pub use last_recording::LastRecording;
pub use phase::{
    CycleCommand, CycleLength, CyclePhase, Transition, DEFAULT_CYCLE_LENGTH, MAX_CYCLE_LENGTH,
    MIN_CYCLE_LENGTH,
};
