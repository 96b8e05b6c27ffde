//! Signal and command channel for the listener loop

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::info;

/// Commands delivered to the listener loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerSignal {
    /// Play the latest recording
    Play,
    /// Stop requested over IPC
    Stop,
    /// SIGINT/SIGTERM
    Shutdown,
}

/// Listener signal handler
///
/// Turns SIGINT/SIGTERM into `Shutdown` and hands out a sender so the IPC
/// server can feed commands into the same channel.
pub struct ListenerSignalHandler {
    receiver: mpsc::Receiver<ListenerSignal>,
}

impl ListenerSignalHandler {
    /// Create the handler and start listening for shutdown signals.
    pub fn new() -> Result<(Self, mpsc::Sender<ListenerSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        for (kind, name) in [
            (SignalKind::interrupt(), "SIGINT"),
            (SignalKind::terminate(), "SIGTERM"),
        ] {
            let tx = tx.clone();
            let mut stream = signal(kind)?;
            tokio::spawn(async move {
                stream.recv().await;
                info!(signal = name, "received shutdown signal");
                let _ = tx.send(ListenerSignal::Shutdown).await;
            });
        }

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<ListenerSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_from_sender_are_received() {
        let (mut handler, tx) = ListenerSignalHandler::new().unwrap();
        tx.send(ListenerSignal::Play).await.unwrap();
        tx.send(ListenerSignal::Stop).await.unwrap();
        assert_eq!(handler.recv().await, Some(ListenerSignal::Play));
        assert_eq!(handler.recv().await, Some(ListenerSignal::Stop));
    }
}
