//! Capture infrastructure module
//!
//! Records from the default input device with cpal and writes 16-bit PCM WAV
//! files named by the capture configuration.

mod cpal_capture;
mod wav;

pub use cpal_capture::CpalCapture;
pub use wav::{resolve_output_path, write_wav};
