//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// RosbagPanel - control an external bag recorder from the terminal
#[derive(Parser, Debug)]
#[command(name = "rosbag-panel")]
#[command(version)]
#[command(about = "Recording control panel for a bag recording service")]
#[command(long_about = None)]
pub struct Cli {
    /// Initial bag name parameter of the recording service
    #[arg(short = 'b', long, value_name = "NAME")]
    pub bag_name: Option<String>,

    /// Initial output directory parameter of the recording service
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Initial topic selection (repeatable)
    #[arg(short = 't', long = "topic", value_name = "TOPIC")]
    pub topics: Vec<String>,

    /// Host render cadence in milliseconds
    #[arg(long, value_name = "MS")]
    pub render_interval: Option<u64>,

    /// Log filter (e.g., info, debug, rosbag_panel=trace)
    #[arg(long, value_name = "LEVEL", env = "ROSBAG_PANEL_LOG")]
    pub log_level: Option<String>,

    /// Config subcommand
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
        /// Config value (comma-separated for topic lists)
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

/// Parsed options for an interactive panel session
#[derive(Debug, Clone)]
pub struct PanelSessionOptions {
    pub render_interval_ms: u64,
    pub timestamp_format: crate::domain::config::TimestampFormat,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "bag_name",
    "output_directory",
    "topics",
    "render_interval_ms",
    "timestamp_format",
    "log_level",
    "demo.topics",
    "demo.bytes_per_second",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
