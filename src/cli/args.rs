//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::cycle::CycleLength;
use crate::domain::permission::PermissionGate;
use crate::domain::recording::Duration;

/// EuroListener - periodic microphone recorder
#[derive(Parser, Debug)]
#[command(name = "euro-listener")]
#[command(version)]
#[command(about = "Records a short microphone clip on a fixed timer and replays the latest one")]
#[command(long_about = None)]
pub struct Cli {
    /// Time between ticks (e.g., 5s, 1s500ms)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub tick_interval: Option<String>,

    /// Ticks per cycle before the counter resets (2-60)
    #[arg(short = 'l', long, value_name = "N")]
    pub cycle_length: Option<String>,

    /// Directory for recorded clips
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// What to do when microphone permission is not granted
    #[arg(long, value_name = "GATE")]
    pub permission_gate: Option<GateArg>,

    /// Skip the device probe and treat the microphone as granted
    #[arg(long)]
    pub assume_permission: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to a running listener
    Ctl {
        #[command(subcommand)]
        action: CtlAction,
    },
}

/// Listener control actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtlAction {
    /// Play the latest recording
    Play,
    /// Show cycle phase and last record time
    Status,
    /// Stop the listener
    Stop,
}

impl CtlAction {
    /// Wire command sent over IPC
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Status => "status",
            Self::Stop => "stop",
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Permission gate argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GateArg {
    Enforce,
    BestEffort,
}

impl From<GateArg> for PermissionGate {
    fn from(arg: GateArg) -> Self {
        match arg {
            GateArg::Enforce => PermissionGate::Enforce,
            GateArg::BestEffort => PermissionGate::BestEffort,
        }
    }
}

/// Resolved options for the listener
#[derive(Debug, Clone)]
pub struct ListenOptions {
    pub tick_interval: Duration,
    pub cycle_length: CycleLength,
    pub output_dir: PathBuf,
    pub permission_gate: PermissionGate,
    pub assume_permission: bool,
    pub notify: bool,
    pub timestamp_format: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "tick_interval",
    "cycle_length",
    "output_dir",
    "permission_gate",
    "notify",
    "timestamp_format",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
