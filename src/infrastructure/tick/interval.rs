//! Repeating timer on top of `tokio::time::interval`

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::application::ports::{Tick, TickReceiver, TickSource};

/// Ticks buffered before the timer waits on the consumer
const CHANNEL_CAPACITY: usize = 4;

/// Tick source driven by the tokio timer.
///
/// The first tick fires one full interval after scheduling. Late ticks are
/// delayed rather than burst.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalTickSource;

impl IntervalTickSource {
    pub fn new() -> Self {
        Self
    }
}

impl TickSource for IntervalTickSource {
    fn schedule(&self, interval: Duration) -> TickReceiver {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut seq = 0u64;
            loop {
                timer.tick().await;
                seq += 1;
                trace!(seq, "tick");
                if tx.send(Tick { seq }).await.is_err() {
                    debug!("tick receiver dropped, stopping timer");
                    break;
                }
            }
        });

        rx
    }
}
