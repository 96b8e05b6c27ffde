//! Shared CLI plumbing: exit codes, logging and config resolution

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::cycle::CycleLength;
use crate::domain::permission::PermissionGate;
use crate::domain::recording::{Duration, MIN_TICK_INTERVAL_MS};
use crate::infrastructure::{default_output_dir, XdgConfigStore};

use super::args::{Cli, ListenOptions};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_PERMISSION_DENIED: u8 = 3;

/// Environment variable overriding `output_dir`
pub const OUTPUT_DIR_ENV: &str = "EURO_LISTENER_OUTPUT_DIR";

/// Install the tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "euro_listener=debug,info"
    } else {
        "euro_listener=info,warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Build the CLI layer of the config, rejecting malformed flags
pub fn cli_config(cli: &Cli) -> Result<AppConfig, String> {
    let tick_interval = match cli.tick_interval.as_deref() {
        Some(raw) => {
            let interval: Duration = raw.parse().map_err(|e| format!("{}", e))?;
            if !interval.is_valid_tick_interval() {
                return Err(format!(
                    "Tick interval must be at least {}ms, got {}",
                    MIN_TICK_INTERVAL_MS, interval
                ));
            }
            Some(interval.to_string())
        }
        None => None,
    };

    let cycle_length = match cli.cycle_length.as_deref() {
        Some(raw) => Some(
            raw.parse::<CycleLength>()
                .map_err(|e| e.to_string())?
                .get(),
        ),
        None => None,
    };

    Ok(AppConfig {
        tick_interval,
        cycle_length,
        output_dir: cli
            .output_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        permission_gate: cli
            .permission_gate
            .map(|g| PermissionGate::from(g).to_string()),
        notify: if cli.no_notify { Some(false) } else { None },
        timestamp_format: None,
    })
}

/// Load and merge configuration: defaults < file < env < CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        output_dir: env::var(OUTPUT_DIR_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Resolve the merged config into listener options
pub fn listen_options(config: &AppConfig, assume_permission: bool) -> ListenOptions {
    ListenOptions {
        tick_interval: config.tick_interval_or_default(),
        cycle_length: config.cycle_length_or_default(),
        output_dir: config.output_dir_or(default_output_dir()),
        permission_gate: config.permission_gate_or_default(),
        assume_permission,
        notify: config.notify_or_default(),
        timestamp_format: config.timestamp_format_or_default().to_string(),
    }
}
