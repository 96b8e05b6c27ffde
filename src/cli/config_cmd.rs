//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::cycle::CycleLength;
use crate::domain::error::ConfigError;
use crate::domain::permission::PermissionGate;
use crate::domain::recording::{Duration, MIN_TICK_INTERVAL_MS};
use crate::domain::time::validate_pattern;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Validate `value` for `key` and store it in normalized form
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "tick_interval" => {
            let interval: Duration = value.parse().map_err(|e| invalid(key, e))?;
            if !interval.is_valid_tick_interval() {
                return Err(invalid(
                    key,
                    format!("Interval must be at least {}ms", MIN_TICK_INTERVAL_MS),
                ));
            }
            config.tick_interval = Some(interval.to_string());
        }
        "cycle_length" => {
            let length: CycleLength = value.parse().map_err(|e| invalid(key, e))?;
            config.cycle_length = Some(length.get());
        }
        "output_dir" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Path must not be empty"));
            }
            config.output_dir = Some(value.to_string());
        }
        "permission_gate" => {
            let gate: PermissionGate = value.parse().map_err(|e| invalid(key, e))?;
            config.permission_gate = Some(gate.to_string());
        }
        "notify" => {
            let enabled =
                parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?;
            config.notify = Some(enabled);
        }
        "timestamp_format" => {
            validate_pattern(value).map_err(|e| invalid(key, e))?;
            config.timestamp_format = Some(value.to_string());
        }
        _ => return ensure_known_key(key),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "tick_interval" => config.tick_interval.clone(),
        "cycle_length" => config.cycle_length.map(|n| n.to_string()),
        "output_dir" => config.output_dir.clone(),
        "permission_gate" => config.permission_gate.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "timestamp_format" => config.timestamp_format.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("NO"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn tick_interval_is_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "tick_interval", "1500ms").unwrap();
        assert_eq!(config.tick_interval, Some("1s500ms".to_string()));
    }

    #[test]
    fn tick_interval_below_minimum_rejected() {
        let mut config = AppConfig::empty();
        let err = apply_value(&mut config, "tick_interval", "20ms").unwrap_err();
        assert!(err.to_string().contains("at least 100ms"));
        assert!(config.tick_interval.is_none());
    }

    #[test]
    fn cycle_length_range_checked() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "cycle_length", "1").is_err());
        assert!(apply_value(&mut config, "cycle_length", "61").is_err());
        apply_value(&mut config, "cycle_length", "6").unwrap();
        assert_eq!(config.cycle_length, Some(6));
    }

    #[test]
    fn permission_gate_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "permission_gate", "best_effort").unwrap();
        assert_eq!(config.permission_gate, Some("best-effort".to_string()));
        assert!(apply_value(&mut config, "permission_gate", "lenient").is_err());
    }

    #[test]
    fn timestamp_format_validated() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "timestamp_format", "%Q").is_err());
        apply_value(&mut config, "timestamp_format", "%H:%M:%S").unwrap();
        assert_eq!(read_value(&config, "timestamp_format").as_deref(), Some("%H:%M:%S"));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(ensure_known_key("api_key").is_err());
        assert!(ensure_known_key("notify").is_ok());
    }
}
