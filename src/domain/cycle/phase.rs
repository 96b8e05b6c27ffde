//! Cycle counter and its transition function

use std::fmt;
use std::str::FromStr;

use crate::domain::error::CycleLengthError;

/// Terminal phase index in the observed behaviour
pub const DEFAULT_CYCLE_LENGTH: u8 = 3;
/// Phase 1 starts and phase 2 stops, so the terminal phase is at least 2
pub const MIN_CYCLE_LENGTH: u8 = 2;
pub const MAX_CYCLE_LENGTH: u8 = 60;

/// Phase that starts a capture
const START_PHASE: u8 = 1;
/// Phase that stops a capture
const STOP_PHASE: u8 = 2;

/// Index N of the terminal phase. A full cycle is N + 1 ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleLength(u8);

impl CycleLength {
    pub fn new(n: u8) -> Result<Self, CycleLengthError> {
        if !(MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&n) {
            return Err(CycleLengthError {
                input: n.to_string(),
                min: MIN_CYCLE_LENGTH,
                max: MAX_CYCLE_LENGTH,
            });
        }
        Ok(Self(n))
    }

    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Number of ticks in one full cycle
    pub const fn ticks_per_cycle(&self) -> u32 {
        self.0 as u32 + 1
    }
}

impl Default for CycleLength {
    fn default() -> Self {
        Self(DEFAULT_CYCLE_LENGTH)
    }
}

impl FromStr for CycleLength {
    type Err = CycleLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.trim().parse().map_err(|_| CycleLengthError {
            input: s.to_string(),
            min: MIN_CYCLE_LENGTH,
            max: MAX_CYCLE_LENGTH,
        })?;
        Self::new(n)
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a tick asks of the capture service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleCommand {
    StartCapture,
    StopCapture,
    /// Filler phase between stop and reset
    Pause,
    /// Terminal phase wrapped back to idle
    Reset,
}

impl CycleCommand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartCapture => "start-capture",
            Self::StopCapture => "stop-capture",
            Self::Pause => "pause",
            Self::Reset => "reset",
        }
    }

    /// Whether this command talks to the capture service
    pub const fn is_capture(&self) -> bool {
        matches!(self, Self::StartCapture | Self::StopCapture)
    }
}

impl fmt::Display for CycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of advancing the counter by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: CyclePhase,
    pub next: CyclePhase,
    pub command: CycleCommand,
}

/// Position within the repeating capture cycle, in `[0, N]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CyclePhase(u8);

impl CyclePhase {
    pub const IDLE: Self = Self(0);

    pub const fn value(&self) -> u8 {
        self.0
    }

    pub const fn from_value(value: u8) -> Self {
        Self(value)
    }

    pub const fn is_idle(&self) -> bool {
        self.0 == 0
    }

    /// Advance by one tick.
    ///
    /// Transitions:
    ///   N     -> 0      (Reset)
    ///   0     -> 1      (StartCapture)
    ///   1     -> 2      (StopCapture)
    ///   k     -> k + 1  (Pause, for 2 <= k < N)
    pub fn advance(self, length: CycleLength) -> Transition {
        if self.0 >= length.get() {
            return Transition {
                previous: self,
                next: Self::IDLE,
                command: CycleCommand::Reset,
            };
        }

        let next = Self(self.0 + 1);
        let command = match next.0 {
            START_PHASE => CycleCommand::StartCapture,
            STOP_PHASE => CycleCommand::StopCapture,
            _ => CycleCommand::Pause,
        };

        Transition {
            previous: self,
            next,
            command,
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
