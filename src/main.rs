//! RosbagPanel CLI entry point

use std::process::ExitCode;

use clap::Parser;

use rosbag_panel::cli::{
    app::{load_merged_config, run_panel, session_options, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use rosbag_panel::domain::config::AppConfig;
use rosbag_panel::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        init_logging(cli.log_level.as_deref().unwrap_or("warn"));
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        bag_name: cli.bag_name,
        output_directory: cli.output_dir,
        topics: (!cli.topics.is_empty()).then_some(cli.topics),
        render_interval_ms: cli.render_interval,
        log_level: cli.log_level,
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;
    init_logging(config.log_level_or_default());

    run_panel(&config, session_options(&config)).await
}
