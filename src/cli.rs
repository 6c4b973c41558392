//! CLI - Command Line Interface for TrailerTUI
//!
//! Every lookup the TUI does is also scriptable. Output is JSON with
//! `--json` (default when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! # Discover, or search by title
//! trailertui list
//! trailertui list "blade runner" --json
//!
//! # Details and trailer for a TMDB id
//! trailertui info 335984
//! trailertui trailer 335984 --play
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::player::PlayerType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error
    Error = 1,
    InvalidArgs = 2,
    /// Network or API error
    NetworkError = 3,
    /// Movie has no videos
    NoTrailer = 4,
    /// Player could not be launched
    PlayerFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// TrailerTUI - browse movies and watch trailers from the terminal
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "trailertui",
    version,
    about = "Search movies, read about them, watch their trailers",
    long_about = "Search TMDB, inspect a movie and play its trailer.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for scripting.",
    after_help = "EXAMPLES:\n\
                  trailertui                          Launch interactive TUI\n\
                  trailertui list \"dune\"              Search movies\n\
                  trailertui trailer 438631 --play    Play a movie's trailer"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// TMDB API key (overrides TMDB_API_KEY and the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Player for trailers
    #[arg(long, short = 'p', global = true, value_enum)]
    pub player: Option<PlayerType>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List movies: search by title, or discover when no query is given
    #[command(visible_aliases = ["ls", "search"])]
    List(ListCmd),

    /// Show a movie's details and videos
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Show (and optionally play) a movie's trailer
    #[command(visible_alias = "t")]
    Trailer(TrailerCmd),
}

/// List movies
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Search query; omit to discover
    pub query: Option<String>,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Movie details by TMDB id
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie id
    #[arg(required = true)]
    pub id: u64,
}

/// Trailer lookup by TMDB id
#[derive(Args, Debug)]
pub struct TrailerCmd {
    /// TMDB movie id
    #[arg(required = true)]
    pub id: u64,

    /// Launch the player and wait for it to close
    #[arg(long)]
    pub play: bool,
}

// =============================================================================
// Response Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }
}

impl JsonOutput<()> {
    pub fn failure(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Trailer lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailerInfo {
    pub movie_id: u64,
    pub title: String,
    pub key: String,
    pub name: String,
    pub site: String,
    pub url: String,
    pub played: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print data as JSON, or as `human` text on a terminal
    pub fn print<T: Serialize>(&self, data: &T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            println!("{}", human(data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        tracing::warn!(code = i32::from(code), error = %msg, "command failed");
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(&JsonOutput::failure(&msg, code)) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet/JSON mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
