//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default spacing between timer ticks (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;

/// Shortest accepted tick interval (milliseconds)
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// A positive span of time with millisecond precision.
///
/// Parsed from strings like `5s`, `500ms`, `1m30s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a duration from milliseconds
    pub const fn from_millis(milliseconds: u64) -> Self {
        Self { milliseconds }
    }

    /// Create a duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default tick interval (5 seconds)
    pub const fn default_tick_interval() -> Self {
        Self::from_millis(DEFAULT_TICK_INTERVAL_MS)
    }

    /// Get whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Whether this duration is long enough to drive the tick timer
    pub const fn is_valid_tick_interval(&self) -> bool {
        self.milliseconds >= MIN_TICK_INTERVAL_MS
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let invalid = || DurationParseError {
            input: s.to_string(),
        };

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(invalid());
            }
            let value: u64 = current_num.parse().map_err(|_| invalid())?;
            current_num.clear();

            let unit_ms = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1_000,
                _ => return Err(invalid()),
            };

            total_ms = value
                .checked_mul(unit_ms)
                .and_then(|v| total_ms.checked_add(v))
                .ok_or_else(invalid)?;
            found_any = true;
        }

        // Leftover digits without a unit
        if !current_num.is_empty() || !found_any || total_ms == 0 {
            return Err(invalid());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.milliseconds / 60_000;
        let seconds = (self.milliseconds % 60_000) / 1000;
        let millis = self.milliseconds % 1000;

        let mut parts = Vec::with_capacity(3);
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        if millis > 0 || parts.is_empty() {
            parts.push(format!("{}ms", millis));
        }
        write!(f, "{}", parts.concat())
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds_only() {
        let d: Duration = "5s".parse().unwrap();
        assert_eq!(d.as_secs(), 5);
        assert_eq!(d.as_millis(), 5000);
    }

    #[test]
    fn parse_millis() {
        let d: Duration = "750ms".parse().unwrap();
        assert_eq!(d.as_millis(), 750);
    }

    #[test]
    fn parse_mixed_units() {
        let d: Duration = "1m30s250ms".parse().unwrap();
        assert_eq!(d.as_millis(), 90_250);
    }

    #[test]
    fn parse_case_insensitive_with_whitespace() {
        let d: Duration = "  1M5S ".parse().unwrap();
        assert_eq!(d.as_secs(), 65);
    }

    #[test]
    fn parse_invalid() {
        assert!("".parse::<Duration>().is_err());
        assert!("5".parse::<Duration>().is_err());
        assert!("s".parse::<Duration>().is_err());
        assert!("5x".parse::<Duration>().is_err());
        assert!("0s".parse::<Duration>().is_err());
        assert!("0ms".parse::<Duration>().is_err());
    }

    #[test]
    fn parse_overflow_is_rejected() {
        assert!("99999999999999999999m".parse::<Duration>().is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Duration::from_secs(5).to_string(), "5s");
        assert_eq!(Duration::from_secs(120).to_string(), "2m");
        assert_eq!(Duration::from_millis(1_500).to_string(), "1s500ms");
        assert_eq!(Duration::from_millis(61_000).to_string(), "1m1s");
    }

    #[test]
    fn default_is_five_seconds() {
        assert_eq!(Duration::default(), Duration::from_secs(5));
        assert_eq!(Duration::default().as_std(), StdDuration::from_secs(5));
    }

    #[test]
    fn tick_interval_floor() {
        assert!(!Duration::from_millis(50).is_valid_tick_interval());
        assert!(Duration::from_millis(100).is_valid_tick_interval());
    }
}
