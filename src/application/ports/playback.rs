//! Audio playback port interface

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingHandle;

/// Errors opening a recording for playback
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("Recording not found: {0}")]
    NotFound(String),

    #[error("Failed to decode recording: {0}")]
    Decode(String),
}

/// Errors while playing an opened recording
#[derive(Debug, Clone, Error)]
pub enum PlayError {
    #[error("Audio output not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Playback failed: {0}")]
    Failed(String),
}

/// A recording that was read and verified decodable
#[derive(Debug, Clone)]
pub struct LoadedSound {
    handle: RecordingHandle,
    data: Arc<[u8]>,
    duration: Option<Duration>,
}

impl LoadedSound {
    pub fn new(handle: RecordingHandle, data: Arc<[u8]>, duration: Option<Duration>) -> Self {
        Self {
            handle,
            data,
            duration,
        }
    }

    pub fn handle(&self) -> &RecordingHandle {
        &self.handle
    }

    /// Encoded file contents
    pub fn data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

/// Port for playing back recordings
#[async_trait]
pub trait AudioPlayback: Send + Sync {
    /// Read and decode a recording.
    async fn open(&self, handle: &RecordingHandle) -> Result<LoadedSound, LoadError>;

    /// Play an opened recording. Resolves when playback completes.
    async fn play(&self, sound: &LoadedSound) -> Result<(), PlayError>;
}
