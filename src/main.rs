//! EuroListener CLI entry point

use std::process::ExitCode;

use clap::Parser;

use euro_listener::cli::{
    app::{cli_config, init_logging, listen_options, load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    ctl_cmd::handle_ctl_command,
    listen_app::run_listener,
    presenter::Presenter,
};
use euro_listener::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Ctl { action }) => {
            if let Err(e) = handle_ctl_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let cli_layer = match cli_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let config = load_merged_config(cli_layer).await;
    run_listener(listen_options(&config, cli.assume_permission)).await
}
