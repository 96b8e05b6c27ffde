//! Rodio-based playback adapter
//!
//! Reads a recording fully into memory, checks it decodes, then plays it
//! on the default output device.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::debug;

use crate::application::ports::{AudioPlayback, LoadError, LoadedSound, PlayError};
use crate::domain::recording::RecordingHandle;

/// Playback implementation using rodio
pub struct RodioPlayback;

impl RodioPlayback {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayback for RodioPlayback {
    async fn open(&self, handle: &RecordingHandle) -> Result<LoadedSound, LoadError> {
        let bytes = tokio::fs::read(handle.path())
            .await
            .map_err(|e| LoadError::NotFound(format!("{}: {}", handle, e)))?;
        let data: Arc<[u8]> = Arc::from(bytes);

        let probe = Arc::clone(&data);
        let duration = tokio::task::spawn_blocking(move || {
            Decoder::new(Cursor::new(probe))
                .map(|decoder| decoder.total_duration())
                .map_err(|e| LoadError::Decode(e.to_string()))
        })
        .await
        .map_err(|e| LoadError::Decode(format!("Task join error: {}", e)))??;

        debug!(file = %handle, ?duration, "opened recording");
        Ok(LoadedSound::new(handle.clone(), data, duration))
    }

    async fn play(&self, sound: &LoadedSound) -> Result<(), PlayError> {
        let data = sound.data();
        // Output streams are not Send, so playback runs on a blocking thread
        tokio::task::spawn_blocking(move || play_sync(data))
            .await
            .map_err(|e| PlayError::Failed(format!("Task join error: {}", e)))?
    }
}

/// Play encoded audio synchronously (called from spawn_blocking)
fn play_sync(data: Arc<[u8]>) -> Result<(), PlayError> {
    let (_stream, stream_handle) =
        OutputStream::try_default().map_err(|e| PlayError::DeviceNotAvailable(e.to_string()))?;

    let sink = Sink::try_new(&stream_handle).map_err(|e| PlayError::Failed(e.to_string()))?;
    let decoder = Decoder::new(Cursor::new(data)).map_err(|e| PlayError::Failed(e.to_string()))?;

    sink.append(decoder);
    sink.sleep_until_end();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::CaptureConfig;
    use crate::infrastructure::capture::write_wav;

    #[tokio::test]
    async fn open_missing_file_is_not_found() {
        let playback = RodioPlayback::new();
        let handle = RecordingHandle::new("/nonexistent/euro-listener/clip.wav");
        assert!(matches!(
            playback.open(&handle).await,
            Err(LoadError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn open_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let playback = RodioPlayback::new();
        let result = playback.open(&RecordingHandle::new(&path)).await;
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }

    #[tokio::test]
    async fn open_reads_wav_written_by_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let config = CaptureConfig::baseline();
        write_wav(&path, &vec![0i16; 16_000], &config).unwrap();

        let playback = RodioPlayback::new();
        let handle = RecordingHandle::new(&path);
        let sound = playback.open(&handle).await.unwrap();

        assert_eq!(sound.handle(), &handle);
        assert!(!sound.data().is_empty());
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn plays_a_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, &vec![0i16; 1_600], &CaptureConfig::baseline()).unwrap();

        let playback = RodioPlayback::new();
        let sound = playback.open(&RecordingHandle::new(&path)).await.unwrap();
        assert!(playback.play(&sound).await.is_ok());
    }
}
