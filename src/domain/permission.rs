//! Microphone permission value objects

use std::fmt;
use std::str::FromStr;

use super::error::InvalidPermissionGateError;

/// Capability being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    RecordAudio,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordAudio => f.write_str("record-audio"),
        }
    }
}

/// Outcome of checking or requesting a permission.
///
/// `Unknown` doubles as "undetermined" for a check that could not decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }

    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text shown when asking the user for access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub title: String,
    pub message: String,
    pub button_positive: String,
    pub button_negative: String,
}

impl PromptConfig {
    /// Prompt for microphone access
    pub fn record_audio() -> Self {
        Self {
            title: "EuroListener needs permission to our mic".to_string(),
            message: "EuroListener needs permission to check your audio to provide a better experience"
                .to_string(),
            button_positive: "Ok".to_string(),
            button_negative: "Cancel".to_string(),
        }
    }
}

/// What to do when permission is not granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionGate {
    /// Refuse to start the cycle unless permission is granted
    #[default]
    Enforce,
    /// Run the cycle anyway and let captures fail
    BestEffort,
}

impl PermissionGate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enforce => "enforce",
            Self::BestEffort => "best-effort",
        }
    }

    /// Whether the cycle may start with the given permission state
    pub const fn allows(&self, state: PermissionState) -> bool {
        match self {
            Self::Enforce => state.is_granted(),
            Self::BestEffort => true,
        }
    }
}

impl FromStr for PermissionGate {
    type Err = InvalidPermissionGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "best-effort" | "best_effort" => Ok(Self::BestEffort),
            _ => Err(InvalidPermissionGateError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
