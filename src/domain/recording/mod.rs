//! Recording value objects

mod capture_config;
mod duration;
mod handle;

pub use capture_config::{
    AudioSource, CaptureConfig, DEFAULT_BITS_PER_SAMPLE, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE,
};
pub use duration::{Duration, DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
pub use handle::{RecordingHandle, RecordingName};
