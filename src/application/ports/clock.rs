//! Clock port interface

use crate::domain::time::{format_timestamp, Timestamp};

/// Port for wall-clock time
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> Timestamp;

    /// Human-readable rendering with a strftime pattern
    fn format(&self, timestamp: &Timestamp, pattern: &str) -> String {
        format_timestamp(timestamp, pattern)
    }
}
