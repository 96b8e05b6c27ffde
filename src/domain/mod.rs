//! Domain layer - Core business logic
//!
//! Contains value objects, the recording-cycle state machine, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod cycle;
pub mod error;
pub mod permission;
pub mod recording;
pub mod time;

// Re-export common types
pub use config::AppConfig;
pub use cycle::{CycleCommand, CycleLength, CyclePhase, LastRecording, Transition};
pub use error::*;
pub use permission::{PermissionGate, PermissionKind, PermissionState, PromptConfig};
pub use recording::{AudioSource, CaptureConfig, Duration, RecordingHandle, RecordingName};
pub use time::Timestamp;
