//! Recording names and handles

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::time::Timestamp;

/// strftime pattern for generated file names.
///
/// 24-hour clock and a millisecond suffix keep names unique per tick and
/// lexicographically ordered by capture time.
const NAME_PATTERN: &str = "file_%Y_%m_%d_%H_%M_%S_%3f";

/// Extension of every captured file
pub const RECORDING_EXTENSION: &str = "wav";

/// File name a capture is written to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingName(String);

impl RecordingName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name used before the first timestamped capture
    pub fn baseline() -> Self {
        Self::new(format!("audio.{}", RECORDING_EXTENSION))
    }

    /// Derive a sortable name from the capture start time
    pub fn from_timestamp(timestamp: &Timestamp) -> Self {
        Self(format!(
            "{}.{}",
            timestamp.format(NAME_PATTERN),
            RECORDING_EXTENSION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with `_<n>` inserted before the extension
    pub fn with_suffix(&self, n: u32) -> Self {
        match self.0.rsplit_once('.') {
            Some((stem, ext)) => Self(format!("{}_{}.{}", stem, n, ext)),
            None => Self(format!("{}_{}", self.0, n)),
        }
    }
}

impl fmt::Display for RecordingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a finished capture.
///
/// Only produced by a successful stop; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingHandle {
    path: PathBuf,
}

impl RecordingHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, if any
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

impl fmt::Display for RecordingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn name_from_timestamp_uses_24_hour_clock() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 17, 4, 5).unwrap();
        let name = RecordingName::from_timestamp(&ts);
        assert_eq!(name.as_str(), "file_2024_03_09_17_04_05_000.wav");
    }

    #[test]
    fn names_sort_chronologically() {
        let morning = Local.with_ymd_and_hms(2024, 3, 9, 9, 0, 0).unwrap();
        let evening = Local.with_ymd_and_hms(2024, 3, 9, 21, 0, 0).unwrap();
        let a = RecordingName::from_timestamp(&morning);
        let b = RecordingName::from_timestamp(&evening);
        assert!(a.as_str() < b.as_str());
    }

    #[test]
    fn suffix_goes_before_extension() {
        let name = RecordingName::new("file_a.wav");
        assert_eq!(name.with_suffix(2).as_str(), "file_a_2.wav");
        assert_eq!(RecordingName::new("plain").with_suffix(1).as_str(), "plain_1");
    }

    #[test]
    fn handle_exposes_file_name() {
        let handle = RecordingHandle::new("/tmp/recordings/file_a.wav");
        assert_eq!(handle.file_name(), Some("file_a.wav"));
        assert_eq!(handle.to_string(), "/tmp/recordings/file_a.wav");
    }
}
