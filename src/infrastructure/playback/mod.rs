//! Playback infrastructure adapters

mod rodio_playback;

pub use rodio_playback::RodioPlayback;
