//! CLI layer - Command-line interface
//!
//! Contains argument parsing, session commands, output formatting, logging
//! and signal setup, and the panel session runner.

pub mod app;
pub mod args;
pub mod command;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_panel, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, PanelSessionOptions};
pub use command::PanelCommand;
pub use presenter::Presenter;
