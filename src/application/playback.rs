//! Playback use case

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::cycle::LastRecording;

use super::ports::{AudioPlayback, LoadError, NotificationIcon, Notifier, PlayError};

const NOTIFY_TITLE: &str = "EuroListener";

/// Errors from the playback use case
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("There is no record")]
    NoRecording,

    #[error("Failed to load record: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to play record: {0}")]
    Play(#[from] PlayError),
}

/// Plays the latest recording on demand.
///
/// Reads the recording published by the cycle controller; never writes it.
pub struct PlaybackController<P, N>
where
    P: AudioPlayback,
    N: Notifier,
{
    playback: P,
    notifier: N,
    latest: watch::Receiver<Option<LastRecording>>,
}

impl<P, N> PlaybackController<P, N>
where
    P: AudioPlayback,
    N: Notifier,
{
    pub fn new(playback: P, notifier: N, latest: watch::Receiver<Option<LastRecording>>) -> Self {
        Self {
            playback,
            notifier,
            latest,
        }
    }

    /// Play the latest recording to completion.
    ///
    /// Concurrent calls are not deduplicated.
    pub async fn play(&self) -> Result<LastRecording, PlaybackError> {
        info!("playing record");
        let latest = self.latest.borrow().clone();
        let Some(recording) = latest else {
            self.report_failure(&PlaybackError::NoRecording).await;
            return Err(PlaybackError::NoRecording);
        };

        let sound = match self.playback.open(recording.handle()).await {
            Ok(sound) => sound,
            Err(e) => {
                let err = PlaybackError::Load(e);
                self.report_failure(&err).await;
                return Err(err);
            }
        };

        if let Err(e) = self.playback.play(&sound).await {
            let err = PlaybackError::Play(e);
            self.report_failure(&err).await;
            return Err(err);
        }

        let _ = self
            .notifier
            .notify(
                NOTIFY_TITLE,
                "Finished playing the record",
                NotificationIcon::Success,
            )
            .await;

        Ok(recording)
    }

    async fn report_failure(&self, err: &PlaybackError) {
        warn!(error = %err, "playback failed");
        let _ = self
            .notifier
            .notify(NOTIFY_TITLE, &err.to_string(), NotificationIcon::Error)
            .await;
    }
}
