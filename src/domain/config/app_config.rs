//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::cycle::CycleLength;
use crate::domain::permission::PermissionGate;
use crate::domain::recording::Duration;
use crate::domain::time::{validate_pattern, DEFAULT_DISPLAY_FORMAT};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub tick_interval: Option<String>,
    pub cycle_length: Option<u8>,
    pub output_dir: Option<String>,
    pub permission_gate: Option<String>,
    pub notify: Option<bool>,
    pub timestamp_format: Option<String>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// `output_dir` has no static default; it is resolved from the platform
    /// data directory at startup.
    pub fn defaults() -> Self {
        Self {
            tick_interval: Some(Duration::default_tick_interval().to_string()),
            cycle_length: Some(CycleLength::default().get()),
            output_dir: None,
            permission_gate: Some(PermissionGate::default().to_string()),
            notify: Some(true),
            timestamp_format: Some(DEFAULT_DISPLAY_FORMAT.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            tick_interval: other.tick_interval.or(self.tick_interval),
            cycle_length: other.cycle_length.or(self.cycle_length),
            output_dir: other.output_dir.or(self.output_dir),
            permission_gate: other.permission_gate.or(self.permission_gate),
            notify: other.notify.or(self.notify),
            timestamp_format: other.timestamp_format.or(self.timestamp_format),
        }
    }

    /// Get tick interval as parsed Duration, or default if not set/invalid
    pub fn tick_interval_or_default(&self) -> Duration {
        self.tick_interval
            .as_ref()
            .and_then(|s| s.parse::<Duration>().ok())
            .filter(Duration::is_valid_tick_interval)
            .unwrap_or_else(Duration::default_tick_interval)
    }

    /// Get cycle length, or default if not set/out of range
    pub fn cycle_length_or_default(&self) -> CycleLength {
        self.cycle_length
            .and_then(|n| CycleLength::new(n).ok())
            .unwrap_or_default()
    }

    /// Get output directory, or `fallback` if not set
    pub fn output_dir_or(&self, fallback: PathBuf) -> PathBuf {
        self.output_dir
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(fallback)
    }

    /// Get permission gate, or `enforce` if not set/invalid
    pub fn permission_gate_or_default(&self) -> PermissionGate {
        self.permission_gate
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Get timestamp display pattern, or the default if not set/invalid
    pub fn timestamp_format_or_default(&self) -> &str {
        self.timestamp_format
            .as_deref()
            .filter(|p| validate_pattern(p).is_ok())
            .unwrap_or(DEFAULT_DISPLAY_FORMAT)
    }
}
