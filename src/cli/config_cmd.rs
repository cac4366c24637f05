//! Config command handler

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, DemoConfig, TimestampFormat};
use crate::domain::error::ConfigError;

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
    apply_config_value(&mut config, key, value)?;

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
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = config_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
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

/// Validate `value` for `key` and store it in `config`
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "bag_name" => config.bag_name = Some(non_empty(value).map_err(invalid)?),
        "output_directory" => config.output_directory = Some(non_empty(value).map_err(invalid)?),
        "topics" => config.topics = Some(parse_topic_list(value).map_err(invalid)?),
        "render_interval_ms" => {
            config.render_interval_ms = Some(parse_positive(value).map_err(invalid)?)
        }
        "timestamp_format" => {
            let format: TimestampFormat = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.timestamp_format = Some(format.pattern().to_string());
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| invalid(format!("Invalid log filter: {}", e)))?;
            config.log_level = Some(value.to_string());
        }
        "demo.topics" => {
            let topics = parse_topic_list(value).map_err(invalid)?;
            config.demo.get_or_insert_with(DemoConfig::default).topics = Some(topics);
        }
        "demo.bytes_per_second" => {
            let rate = parse_positive(value).map_err(invalid)?;
            config
                .demo
                .get_or_insert_with(DemoConfig::default)
                .bytes_per_second = Some(rate);
        }
        _ => unreachable!(), // Already validated
    }
    Ok(())
}

/// Display form of a config value, `None` when unset
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    let demo = config.demo.as_ref();
    match key {
        "bag_name" => config.bag_name.clone(),
        "output_directory" => config.output_directory.clone(),
        "topics" => config.topics.as_ref().map(|t| t.join(",")),
        "render_interval_ms" => config.render_interval_ms.map(|ms| ms.to_string()),
        "timestamp_format" => config.timestamp_format.clone(),
        "log_level" => config.log_level.clone(),
        "demo.topics" => demo.and_then(|d| d.topics.as_ref()).map(|t| t.join(",")),
        "demo.bytes_per_second" => demo.and_then(|d| d.bytes_per_second).map(|r| r.to_string()),
        _ => None,
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Value must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_positive(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Invalid value '{}'. Expected a positive integer", value)),
    }
}

/// Parse a comma-separated topic list. Topic names must be absolute.
fn parse_topic_list(value: &str) -> Result<Vec<String>, String> {
    let topics: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if topics.is_empty() {
        return Err("Expected at least one topic (comma-separated)".to_string());
    }
    if let Some(bad) = topics.iter().find(|t| !t.starts_with('/')) {
        return Err(format!("Invalid topic '{}'. Topic names start with '/'", bad));
    }
    Ok(topics)
}
