//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{CaptureConfig, RecordingHandle};

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to stop capture: {0}")]
    StopFailed(String),

    #[error("No capture in progress")]
    NoActiveCapture,

    #[error("Capture already in progress")]
    AlreadyCapturing,

    #[error("No audio input device available")]
    NoAudioDevice,
}

/// Port for start/stop audio capture into a file
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Apply settings for the next capture.
    ///
    /// Fails with `AlreadyCapturing` while a capture is running.
    fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError>;

    /// Begin capturing with the last applied settings.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Finish the running capture and return a handle to the written file.
    async fn stop(&self) -> Result<RecordingHandle, CaptureError>;

    /// Check if a capture is running
    fn is_capturing(&self) -> bool;
}
