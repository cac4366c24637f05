//! Main app runner for interactive panel sessions

use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::application::ports::{ConfigStore, PanelHost};
use crate::application::{PanelError, PanelOptions, RecordingPanel};
use crate::domain::config::AppConfig;
use crate::infrastructure::{SimulatedHostConfig, SimulatedRecorderHost, XdgConfigStore};

use super::args::PanelSessionOptions;
use super::command::{PanelCommand, SESSION_HELP};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "ROSBAG_PANEL_LOG";

enum Flow {
    Continue,
    Quit,
}

/// Run an interactive panel session against the simulated recorder.
///
/// Ends on `quit`, end of input, or SIGINT/SIGTERM. The panel is unmounted
/// on the way out.
pub async fn run_panel(config: &AppConfig, options: PanelSessionOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup() {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let host = SimulatedRecorderHost::new(SimulatedHostConfig::from_app_config(config));
    let panel = Arc::new(RecordingPanel::mount(
        host.clone(),
        PanelOptions {
            timestamp_format: options.timestamp_format,
        },
    ));

    // Unmounting abandons whatever start/stop call is in flight
    {
        let panel = Arc::clone(&panel);
        let token = shutdown.token();
        tokio::spawn(async move {
            token.cancelled().await;
            panel.unmount();
        });
    }

    // First render brings in the catalog and the service's current parameters
    deliver_render(&host, &panel);
    presenter.show_panel(&panel.view());

    let interactive = std::io::stdin().is_terminal();
    if interactive {
        presenter.info("Type 'help' for commands");
        presenter.prompt();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(options.render_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.wait() => {
                presenter.stop_spinner();
                presenter.info("Interrupted");
                break;
            }
            _ = ticker.tick() => {
                deliver_render(&host, &panel);
                presenter.sync_recording_status(&panel.view());
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Flow::Quit = handle_line(panel.as_ref(), &mut presenter, &line).await {
                        break;
                    }
                    if interactive {
                        presenter.prompt();
                    }
                }
                Ok(None) => {
                    debug!("End of input");
                    break;
                }
                Err(e) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    break;
                }
            },
        }
    }

    presenter.stop_spinner();
    if panel.snapshot().is_recording() {
        presenter.warn("Leaving while a recording is active; the recorder keeps running");
    }
    panel.unmount();
    shutdown.trigger();

    info!("Session ended");
    ExitCode::from(EXIT_SUCCESS)
}

/// Hand the host's next render to the panel, if the host has one ready
fn deliver_render(host: &SimulatedRecorderHost, panel: &RecordingPanel<SimulatedRecorderHost>) {
    if let Some(notification) = host.next_render() {
        panel.on_render(notification);
    }
}

async fn handle_line<H: PanelHost>(
    panel: &RecordingPanel<H>,
    presenter: &mut Presenter,
    line: &str,
) -> Flow {
    let command = match line.parse::<PanelCommand>() {
        Ok(command) => command,
        Err(super::command::CommandParseError::Empty) => return Flow::Continue,
        Err(e) => {
            presenter.warn(&e.to_string());
            return Flow::Continue;
        }
    };

    match command {
        PanelCommand::Name(name) => {
            panel.set_bag_name(name.as_str());
            presenter.success(&format!("Bag name: {}", name));
        }
        PanelCommand::Dir(dir) => {
            panel.set_output_directory(dir.as_str());
            presenter.success(&format!("Output directory: {}", dir));
        }
        PanelCommand::Check(topic) => {
            warn_if_not_offered(panel, presenter, &topic);
            panel.set_topic_checked(topic.as_str(), true);
            presenter.success(&format!("Selected {}", topic));
        }
        PanelCommand::Uncheck(topic) => {
            panel.set_topic_checked(topic.as_str(), false);
            presenter.success(&format!("Deselected {}", topic));
        }
        PanelCommand::Toggle(topic) => {
            let checked = panel.toggle_topic(topic.as_str());
            let verb = if checked { "Selected" } else { "Deselected" };
            presenter.success(&format!("{} {}", verb, topic));
        }
        PanelCommand::Start => report(panel.start_recording().await, panel, presenter),
        PanelCommand::Stop => report(panel.stop_recording().await, panel, presenter),
        PanelCommand::Record => report(panel.toggle_recording().await, panel, presenter),
        PanelCommand::Show => presenter.show_panel(&panel.view()),
        PanelCommand::Help => presenter.output(SESSION_HELP),
        PanelCommand::Quit => return Flow::Quit,
    }

    Flow::Continue
}

fn warn_if_not_offered<H: PanelHost>(panel: &RecordingPanel<H>, presenter: &Presenter, topic: &str) {
    let view = panel.view();
    if !view.checklist.iter().any(|entry| entry.name == topic) {
        presenter.warn(&format!("{} is not in the topic catalog", topic));
    }
}

fn report<H: PanelHost>(
    result: Result<(), PanelError>,
    panel: &RecordingPanel<H>,
    presenter: &mut Presenter,
) {
    match result {
        Ok(()) => presenter.show_panel(&panel.view()),
        Err(e @ PanelError::Unavailable { .. }) => presenter.warn(&e.to_string()),
        Err(e) => presenter.error(&e.to_string()),
    }
    presenter.sync_recording_status(&panel.view());
}

/// Config read from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        log_level: env::var(LOG_ENV_VAR).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Session options from the merged config
pub fn session_options(config: &AppConfig) -> PanelSessionOptions {
    PanelSessionOptions {
        render_interval_ms: config.render_interval_ms_or_default(),
        timestamp_format: config.timestamp_format_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{TimestampFormat, DEFAULT_RENDER_INTERVAL_MS};

    fn panel_with_catalog() -> (SimulatedRecorderHost, RecordingPanel<SimulatedRecorderHost>) {
        let host = SimulatedRecorderHost::new(SimulatedHostConfig {
            topics: vec!["/imu".to_string(), "/odom".to_string()],
            bytes_per_second: 1024,
            parameters: Default::default(),
        });
        let panel = RecordingPanel::mount(host.clone(), PanelOptions::default());
        deliver_render(&host, &panel);
        (host, panel)
    }

    #[test]
    fn session_options_use_defaults() {
        let options = session_options(&AppConfig::empty());
        assert_eq!(options.render_interval_ms, DEFAULT_RENDER_INTERVAL_MS);
        assert_eq!(options.timestamp_format, TimestampFormat::default());
    }

    #[tokio::test]
    async fn handle_line_edits_form() {
        let (_host, panel) = panel_with_catalog();
        let mut presenter = Presenter::new();

        handle_line(&panel, &mut presenter, "name field_run").await;
        handle_line(&panel, &mut presenter, "dir /data").await;
        handle_line(&panel, &mut presenter, "check /imu").await;
        handle_line(&panel, &mut presenter, "toggle /odom").await;
        handle_line(&panel, &mut presenter, "toggle /odom").await;

        let state = panel.snapshot();
        assert_eq!(state.bag_name(), "field_run");
        assert_eq!(state.output_directory(), "/data");
        assert_eq!(state.selected_topics(), ["/imu"]);
        assert!(state.can_start());
    }

    #[tokio::test]
    async fn handle_line_records_and_saves() {
        let (host, panel) = panel_with_catalog();
        let mut presenter = Presenter::new();

        for line in ["name run", "dir /tmp", "check /odom", "start"] {
            handle_line(&panel, &mut presenter, line).await;
        }
        assert!(panel.snapshot().is_recording());
        assert!(host.is_recording());

        handle_line(&panel, &mut presenter, "record").await;
        presenter.stop_spinner();

        let state = panel.snapshot();
        assert!(!state.is_recording());
        assert_eq!(state.saved_bags().len(), 1);
        assert_eq!(state.saved_bags()[0].name, "run");
        assert_eq!(host.recordings().len(), 1);
    }

    #[tokio::test]
    async fn handle_line_quit_and_unknown() {
        let (_host, panel) = panel_with_catalog();
        let mut presenter = Presenter::new();

        assert!(matches!(
            handle_line(&panel, &mut presenter, "quit").await,
            Flow::Quit
        ));
        assert!(matches!(
            handle_line(&panel, &mut presenter, "launch").await,
            Flow::Continue
        ));
        assert!(matches!(
            handle_line(&panel, &mut presenter, "").await,
            Flow::Continue
        ));
    }

    #[tokio::test]
    async fn start_without_form_leaves_panel_idle() {
        let (host, panel) = panel_with_catalog();
        let mut presenter = Presenter::new();

        handle_line(&panel, &mut presenter, "start").await;

        assert!(!panel.snapshot().is_recording());
        assert!(!host.is_recording());
    }
}
