//! Wall-clock adapter backed by chrono

use chrono::Local;

use crate::application::ports::Clock;
use crate::domain::time::Timestamp;

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn format_uses_pattern() {
        let clock = SystemClock::new();
        let rendered = clock.format(&clock.now(), "%Y");
        assert_eq!(rendered.len(), 4);
    }
}
