//! Tick source port interface

use std::time::Duration;

use tokio::sync::mpsc;

/// One firing of the repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 1-based firing count
    pub seq: u64,
}

/// Receiving end of a scheduled timer. Dropping it cancels the timer.
pub type TickReceiver = mpsc::Receiver<Tick>;

/// Port for a repeating timer
pub trait TickSource: Send + Sync {
    /// Start firing every `interval`, in strict order.
    fn schedule(&self, interval: Duration) -> TickReceiver;
}
