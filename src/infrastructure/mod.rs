//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: cpal capture, rodio
//! playback, the tokio timer, desktop notifications and XDG config.

pub mod capture;
pub mod clock;
pub mod config;
pub mod notification;
pub mod permission;
pub mod playback;
pub mod tick;

pub use capture::CpalCapture;
pub use clock::SystemClock;
pub use config::{default_output_dir, XdgConfigStore};
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use permission::{create_permission_service, DeviceProbePermission, StaticPermission};
pub use playback::RodioPlayback;
pub use tick::IntervalTickSource;
