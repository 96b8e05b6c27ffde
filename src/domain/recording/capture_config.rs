//! Capture parameters handed to the audio capture service

use std::fmt;

use super::handle::RecordingName;

/// Speech-friendly capture rate
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;
/// Mono
pub const DEFAULT_CHANNELS: u16 = 1;
/// 16-bit PCM
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// Where captured audio comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioSource {
    /// The platform's default microphone
    #[default]
    Microphone,
}

impl AudioSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
        }
    }
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full configuration for one capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub source: AudioSource,
    pub output_name: RecordingName,
}

impl CaptureConfig {
    /// Settings applied once at startup, before any capture is named
    pub fn baseline() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            source: AudioSource::Microphone,
            output_name: RecordingName::baseline(),
        }
    }

    /// Same settings, writing to a different file name
    pub fn with_output_name(self, output_name: RecordingName) -> Self {
        Self {
            output_name,
            ..self
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_matches_speech_settings() {
        let config = CaptureConfig::baseline();
        assert_eq!(config.sample_rate, 16_000);
        assert_eq!(config.channels, 1);
        assert_eq!(config.bits_per_sample, 16);
        assert_eq!(config.source, AudioSource::Microphone);
        assert_eq!(config.output_name.as_str(), "audio.wav");
    }

    #[test]
    fn with_output_name_keeps_format() {
        let name = RecordingName::new("file_x.wav");
        let config = CaptureConfig::baseline().with_output_name(name.clone());
        assert_eq!(config.output_name, name);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    }
}
