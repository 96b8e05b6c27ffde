//! WAV file output for captured samples

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::application::ports::CaptureError;
use crate::domain::recording::{CaptureConfig, RecordingName};

/// Pick a path in `dir` for `name` that does not exist yet.
///
/// Appends `_1`, `_2`, ... before the extension on collision.
pub fn resolve_output_path(dir: &Path, name: &RecordingName) -> PathBuf {
    let candidate = dir.join(name.as_str());
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| dir.join(name.with_suffix(n).as_str()))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Write mono i16 samples as a WAV file matching `config`.
///
/// Mono input is duplicated across channels; 8-bit output keeps the high byte.
pub fn write_wav(path: &Path, samples: &[i16], config: &CaptureConfig) -> Result<(), CaptureError> {
    let channels = config.channels.max(1);
    let spec = WavSpec {
        channels,
        sample_rate: config.sample_rate,
        bits_per_sample: config.bits_per_sample,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| CaptureError::StopFailed(format!("Failed to create WAV file: {}", e)))?;

    for &sample in samples {
        for _ in 0..channels {
            let written = match config.bits_per_sample {
                8 => writer.write_sample((sample >> 8) as i8),
                16 => writer.write_sample(sample),
                bits => {
                    return Err(CaptureError::StopFailed(format!(
                        "Unsupported bits per sample: {}",
                        bits
                    )))
                }
            };
            written.map_err(|e| {
                CaptureError::StopFailed(format!("Failed to write sample: {}", e))
            })?;
        }
    }

    writer
        .finalize()
        .map_err(|e| CaptureError::StopFailed(format!("Failed to finalize WAV file: {}", e)))?;

    debug!(samples = samples.len(), path = %path.display(), "wrote WAV file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn writes_mono_16_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let samples = vec![0i16, 1000, -1000, i16::MAX];

        write_wav(&path, &samples, &CaptureConfig::baseline()).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn duplicates_samples_for_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let config = CaptureConfig {
            channels: 2,
            ..CaptureConfig::baseline()
        };

        write_wav(&path, &[5, 6], &config).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, vec![5, 5, 6, 6]);
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        let config = CaptureConfig {
            bits_per_sample: 24,
            ..CaptureConfig::baseline()
        };
        assert!(write_wav(&path, &[1], &config).is_err());
    }

    #[test]
    fn output_path_avoids_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let name = RecordingName::new("file_a.wav");

        let first = resolve_output_path(dir.path(), &name);
        assert_eq!(first, dir.path().join("file_a.wav"));
        std::fs::write(&first, b"x").unwrap();

        let second = resolve_output_path(dir.path(), &name);
        assert_eq!(second, dir.path().join("file_a_1.wav"));
    }
}
