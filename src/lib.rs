//! TrailerTUI - browse movies and watch trailers from the terminal
//!
//! Search TMDB (or discover popular titles), pick a movie from the grid to
//! see its details in the hero panel, and play its trailer in mpv, VLC or
//! the browser.
//!
//! # Modules
//!
//! - `models` - Movie summaries, details, videos and the trailer policy
//! - `api` - TMDB client
//! - `app` - Application state machine (pure, emits effects)
//! - `runtime` - Terminal session, key subscription, effect execution
//! - `player` - External trailer player
//! - `ui` - TUI components
//! - `config` / `logging` - Settings file and tracing setup
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod player;
pub mod runtime;
pub mod ui;

// Re-export commonly used types
pub use models::{select_trailer, MovieDetail, MovieSummary, Video};

pub use api::{TmdbClient, TmdbError};
pub use app::{ApiEvent, App, Catalog, Effect, Hero, TrailerState};
pub use config::Config;
pub use player::{PlayerType, TrailerPlayer};
