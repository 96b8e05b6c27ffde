//! IPC for listener control over a Unix domain socket
//!
//! Line protocol: the client writes one of `play`, `status`, `stop` and
//! reads back one line.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::fmt;
use std::io;

use tokio::sync::mpsc;

use super::signals::ListenerSignal;

/// Status snapshot reported to `ctl status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerStatus {
    pub phase: u8,
    pub cycle_length: u8,
    pub capturing: bool,
    /// Formatted time of the last recording
    pub last_record: Option<String>,
}

impl fmt::Display for ListenerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phase {}/{} | {} | last record: {}",
            self.phase,
            self.cycle_length,
            if self.capturing { "recording" } else { "idle" },
            self.last_record.as_deref().unwrap_or("none")
        )
    }
}

/// Status function type for IPC servers
pub type StatusFn = Box<dyn Fn() -> ListenerStatus + Send + Sync>;

/// Trait for IPC servers that listen for listener commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections forever, forwarding commands to `tx`.
    ///
    /// `status_fn` is called per connection to answer status queries.
    async fn run(&self, tx: mpsc::Sender<ListenerSignal>, status_fn: StatusFn) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the listener
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if a listener appears to be running (endpoint exists)
    fn is_listener_running(&self) -> bool;

    /// Send a command and receive the response line
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
