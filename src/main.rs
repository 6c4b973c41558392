//! TrailerTUI - browse movies and watch trailers from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! trailertui
//!
//! # CLI mode (for automation)
//! trailertui list "blade runner"
//! trailertui trailer 78 --play --player browser
//! ```

use anyhow::Result;
use clap::Parser;

use trailertui::cli::{Cli, Command, ExitCode, Output};
use trailertui::config::Config;
use trailertui::ui::RenderContext;
use trailertui::{commands, logging, runtime};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let log_file = logging::init_logging(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_file, "trailertui starting");

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    }

    // TUI mode: launch interactive interface
    let player = config.trailer_player(cli.player);
    let client = config.tmdb_client(cli.api_key.as_deref());
    let ctx = RenderContext {
        image_base: config.image_base_url().to_string(),
        player: player.player_type(),
    };

    let result = runtime::run_tui(client, player, ctx).await;
    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
    }
    result
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let client = config.tmdb_client(cli.api_key.as_deref());
    let player = config.trailer_player(cli.player);

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, &client, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &client, &output).await,

        Some(Command::Trailer(cmd)) => commands::trailer_cmd(cmd, &client, &player, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}
