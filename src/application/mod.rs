//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations and trait definitions
//! for external system interactions.

pub mod cycle;
pub mod permission;
pub mod playback;
pub mod ports;

// Re-export use cases
pub use cycle::{
    CaptureReport, CycleConfig, CycleError, CycleStatus, RecordingCycleController, TickOutcome,
    TickReport,
};
pub use permission::resolve_permission;
pub use playback::{PlaybackController, PlaybackError};
