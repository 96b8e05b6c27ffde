//! CLI layer - Command-line interface
//!
//! Argument parsing, output formatting, signal handling, IPC and the
//! listener runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod ctl_cmd;
pub mod ipc;
pub mod listen_app;
pub mod pid_file;
pub mod presenter;
pub mod signals;

pub use app::{EXIT_ERROR, EXIT_PERMISSION_DENIED, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, CtlAction, ListenOptions};
pub use ctl_cmd::handle_ctl_command;
pub use listen_app::run_listener;
pub use presenter::Presenter;
