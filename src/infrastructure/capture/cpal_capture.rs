//! Cross-platform audio capture using cpal
//!
//! Captures from the default input device at whatever rate it supports,
//! mixes down to mono and resamples to the configured rate on stop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{debug, error};

use super::wav::{resolve_output_path, write_wav};
use crate::application::ports::{AudioCapture, CaptureError};
use crate::domain::recording::{CaptureConfig, RecordingHandle};

/// Audio capture using cpal.
///
/// The stream lives on a dedicated thread because `cpal::Stream` is not Send.
pub struct CpalCapture {
    output_dir: PathBuf,
    /// Settings for the next/current capture
    config: StdMutex<CaptureConfig>,
    /// Captured samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate (may differ from the configured rate)
    device_sample_rate: Arc<AtomicU32>,
    is_capturing: Arc<AtomicBool>,
    stream_thread: StdMutex<Option<JoinHandle<()>>>,
}

impl CpalCapture {
    /// Create a capture adapter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            config: StdMutex::new(CaptureConfig::baseline()),
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            stream_thread: StdMutex::new(None),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Get the default input device
    pub(crate) fn get_input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(CaptureError::NoAudioDevice)
    }

    /// Get a suitable input configuration, preferring `target_rate` and fewer channels
    pub(crate) fn get_input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            // Only i16 or f32 formats
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= target_rate
                && config.max_sample_rate().0 >= target_rate;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > target_rate;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(CaptureError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= target_rate
            && config_range.max_sample_rate().0 >= target_rate
        {
            SampleRate(target_rate)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Resample mono audio from the device rate to `target_rate`
    fn resample(
        samples: &[i16],
        source_rate: u32,
        target_rate: u32,
    ) -> Result<Vec<i16>, CaptureError> {
        if source_rate == target_rate {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = target_rate as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            target_rate as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| CaptureError::StopFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();
            // Zero-pad the final chunk
            chunk.resize(frames_needed, 0.0);

            let input = vec![chunk];
            let resampled = resampler
                .process(&input, None)
                .map_err(|e| CaptureError::StopFailed(format!("Resampling failed: {}", e)))?;

            output.extend(
                resampled[0]
                    .iter()
                    .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16),
            );
            input_pos = end_pos;
        }

        output.truncate(output_len);
        Ok(output)
    }

    /// Mix interleaved multi-channel audio down to mono
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / chunk.len() as i32) as i16
            })
            .collect()
    }

    fn current_config(&self) -> CaptureConfig {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Open the device and pump samples into the buffer until capture stops.
    ///
    /// Clears `is_capturing` on any failure so `start` can report it.
    fn run_stream(
        target_rate: u32,
        audio_buffer: Arc<StdMutex<Vec<i16>>>,
        device_sample_rate: Arc<AtomicU32>,
        is_capturing: Arc<AtomicBool>,
    ) {
        let fail = |reason: String| {
            error!(%reason, "capture stream failed");
            is_capturing.store(false, Ordering::SeqCst);
        };

        let device = match Self::get_input_device() {
            Ok(d) => d,
            Err(e) => return fail(e.to_string()),
        };
        let (config, sample_format) = match Self::get_input_config(&device, target_rate) {
            Ok(c) => c,
            Err(e) => return fail(e.to_string()),
        };

        let channels = config.channels;
        device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

        let stream_result = match sample_format {
            SampleFormat::I16 => {
                let audio_buffer = Arc::clone(&audio_buffer);
                let is_capturing = Arc::clone(&is_capturing);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if is_capturing.load(Ordering::SeqCst) {
                            let mono = Self::downmix(data, channels);
                            if let Ok(mut buffer) = audio_buffer.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| error!(error = %err, "audio stream error"),
                    None,
                )
            }
            SampleFormat::F32 => {
                let audio_buffer = Arc::clone(&audio_buffer);
                let is_capturing = Arc::clone(&is_capturing);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if is_capturing.load(Ordering::SeqCst) {
                            let i16_data: Vec<i16> = data
                                .iter()
                                .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
                                .collect();
                            let mono = Self::downmix(&i16_data, channels);
                            if let Ok(mut buffer) = audio_buffer.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| error!(error = %err, "audio stream error"),
                    None,
                )
            }
            other => return fail(format!("Unsupported sample format: {:?}", other)),
        };

        let stream = match stream_result {
            Ok(s) => s,
            Err(e) => return fail(e.to_string()),
        };
        if let Err(e) = stream.play() {
            return fail(e.to_string());
        }

        debug!(rate = config.sample_rate.0, channels, "capture stream running");
        while is_capturing.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        drop(stream);
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError> {
        if self.is_capturing() {
            return Err(CaptureError::AlreadyCapturing);
        }
        *self.config.lock().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    async fn start(&self) -> Result<(), CaptureError> {
        if self
            .is_capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CaptureError::AlreadyCapturing);
        }

        self.audio_buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.device_sample_rate.store(0, Ordering::SeqCst);

        let target_rate = self.current_config().sample_rate;
        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);

        let handle = std::thread::spawn(move || {
            Self::run_stream(target_rate, audio_buffer, device_sample_rate, is_capturing)
        });
        *self
            .stream_thread
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(handle);

        // Give the thread a moment to open the device
        sleep(TokioDuration::from_millis(50)).await;

        if !self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Input stream could not be opened".into(),
            ));
        }

        Ok(())
    }

    async fn stop(&self) -> Result<RecordingHandle, CaptureError> {
        if !self.is_capturing.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::NoActiveCapture);
        }

        let thread = self
            .stream_thread
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(thread) = thread {
            tokio::task::spawn_blocking(move || thread.join())
                .await
                .map_err(|e| CaptureError::StopFailed(format!("Join error: {}", e)))?
                .map_err(|_| CaptureError::StopFailed("Capture thread panicked".into()))?;
        }

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::StopFailed("Sample rate not set".into()));
        }

        let samples = std::mem::take(&mut *self.audio_buffer.lock().unwrap_or_else(|e| e.into_inner()));
        if samples.is_empty() {
            return Err(CaptureError::StopFailed("No audio data captured".into()));
        }

        let config = self.current_config();
        let output_dir = self.output_dir.clone();

        // Resampling and file I/O are blocking
        tokio::task::spawn_blocking(move || -> Result<RecordingHandle, CaptureError> {
            std::fs::create_dir_all(&output_dir).map_err(|e| {
                CaptureError::StopFailed(format!("Failed to create output directory: {}", e))
            })?;
            let resampled = Self::resample(&samples, sample_rate, config.sample_rate)?;
            let path = resolve_output_path(&output_dir, &config.output_name);
            write_wav(&path, &resampled, &config)?;
            Ok(RecordingHandle::new(path))
        })
        .await
        .map_err(|e| CaptureError::StopFailed(format!("Encode task error: {}", e)))?
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_single_channel() {
        let mono = vec![100i16, 200, 300];
        assert_eq!(CpalCapture::downmix(&mono, 1), mono);
    }

    #[test]
    fn downmix_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(CpalCapture::downmix(&stereo, 2), vec![150, 350]);
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![1i16, 2, 3];
        assert_eq!(
            CpalCapture::resample(&samples, 16_000, 16_000).unwrap(),
            samples
        );
    }

    #[test]
    fn resample_halves_length() {
        let samples = vec![0i16; 32_000];
        let out = CpalCapture::resample(&samples, 32_000, 16_000).unwrap();
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn default_state() {
        let capture = CpalCapture::new("/tmp/euro-listener-test");
        assert!(!capture.is_capturing());
        assert_eq!(capture.output_dir(), &PathBuf::from("/tmp/euro-listener-test"));
    }

    #[tokio::test]
    async fn stop_without_start_fails() {
        let capture = CpalCapture::new("/tmp/euro-listener-test");
        assert!(matches!(
            capture.stop().await,
            Err(CaptureError::NoActiveCapture)
        ));
    }

    #[test]
    fn configure_replaces_settings() {
        let capture = CpalCapture::new("/tmp/euro-listener-test");
        let config = CaptureConfig {
            sample_rate: 8_000,
            ..CaptureConfig::baseline()
        };
        capture.configure(config).unwrap();
        assert_eq!(capture.current_config().sample_rate, 8_000);
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn captures_a_short_clip() {
        let dir = tempfile::tempdir().unwrap();
        let capture = CpalCapture::new(dir.path());
        capture.start().await.unwrap();
        sleep(TokioDuration::from_millis(500)).await;
        let handle = capture.stop().await.unwrap();
        assert!(handle.path().exists());
    }
}
