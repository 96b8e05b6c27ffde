//! EuroListener - periodic microphone recorder
//!
//! Records a short clip on a fixed timer, keeps the most recent one and
//! plays it back on request.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Cycle state machine, recording value objects, config and errors
//! - **Application**: The cycle and playback controllers plus port traits
//! - **Infrastructure**: Adapters (cpal capture, rodio playback, tokio timer, notify-rust, XDG config)
//! - **CLI**: Argument parsing, the listener loop, IPC control and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
