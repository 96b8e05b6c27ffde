//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod clock;
pub mod config;
pub mod notifier;
pub mod permission;
pub mod playback;
pub mod tick;

// Re-export common types
pub use capture::{AudioCapture, CaptureError};
pub use clock::Clock;
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use permission::PermissionService;
pub use playback::{AudioPlayback, LoadError, LoadedSound, PlayError};
pub use tick::{Tick, TickReceiver, TickSource};
