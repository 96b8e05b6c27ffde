//! Wall-clock timestamps and display formatting

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use super::error::InvalidTimestampFormatError;

/// Wall-clock time in the local timezone
pub type Timestamp = DateTime<Local>;

/// Pattern used to show the last record time
pub const DEFAULT_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Check that a strftime pattern contains no unrenderable items.
///
/// chrono panics when an invalid pattern is rendered through `to_string`,
/// so every user-supplied pattern goes through here first.
pub fn validate_pattern(pattern: &str) -> Result<(), InvalidTimestampFormatError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidTimestampFormatError {
            input: pattern.to_string(),
        });
    }
    Ok(())
}

/// Render a timestamp, falling back to the default pattern when `pattern` is invalid
pub fn format_timestamp(timestamp: &Timestamp, pattern: &str) -> String {
    let pattern = match validate_pattern(pattern) {
        Ok(()) => pattern,
        Err(_) => DEFAULT_DISPLAY_FORMAT,
    };
    timestamp.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Timestamp {
        Local.with_ymd_and_hms(2024, 3, 9, 17, 4, 5).unwrap()
    }

    #[test]
    fn default_pattern_is_valid() {
        assert!(validate_pattern(DEFAULT_DISPLAY_FORMAT).is_ok());
    }

    #[test]
    fn rejects_dangling_specifier() {
        assert!(validate_pattern("%Y-%").is_err());
        assert!(validate_pattern("%Q").is_err());
    }

    #[test]
    fn formats_with_default_pattern() {
        assert_eq!(
            format_timestamp(&sample(), DEFAULT_DISPLAY_FORMAT),
            "2024-03-09 17:04:05"
        );
    }

    #[test]
    fn invalid_pattern_falls_back() {
        assert_eq!(format_timestamp(&sample(), "%Q"), "2024-03-09 17:04:05");
    }
}
