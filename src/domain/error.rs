//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number>ms, <number>s, <number>m or a combination (e.g., 500ms, 5s, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a cycle length is out of range
#[derive(Debug, Clone, Error)]
#[error("Invalid cycle length: \"{input}\". Expected a whole number between {min} and {max}")]
pub struct CycleLengthError {
    pub input: String,
    pub min: u8,
    pub max: u8,
}

/// Error when an unknown permission gate policy is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid permission gate: \"{input}\". Valid values are: enforce, best-effort")]
pub struct InvalidPermissionGateError {
    pub input: String,
}

/// Error when a timestamp display pattern cannot be rendered
#[derive(Debug, Clone, Error)]
#[error("Invalid timestamp format: \"{input}\"")]
pub struct InvalidTimestampFormatError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
