//! Most recent successful capture

use crate::domain::recording::RecordingHandle;
use crate::domain::time::Timestamp;

/// Handle and creation time of the latest capture.
///
/// Built and replaced as one value so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRecording {
    handle: RecordingHandle,
    recorded_at: Timestamp,
}

impl LastRecording {
    pub fn new(handle: RecordingHandle, recorded_at: Timestamp) -> Self {
        Self {
            handle,
            recorded_at,
        }
    }

    pub fn handle(&self) -> &RecordingHandle {
        &self.handle
    }

    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }
}
