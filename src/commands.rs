//! CLI Command Handlers
//!
//! Implements the CLI commands on top of the TMDB client and the trailer
//! player. Each handler takes CLI args and Output, returns ExitCode.

use crate::api::{TmdbClient, TmdbError};
use crate::cli::{ExitCode, InfoCmd, ListCmd, Output, TrailerCmd, TrailerInfo};
use crate::models::{MovieDetail, MovieSummary};
use crate::player::{embed_url, watch_url, PlayerType, TrailerPlayer};

/// Exit code for a failed API call
pub fn api_exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::MissingApiKey) => ExitCode::Error,
        Some(TmdbError::NotFound) => ExitCode::InvalidArgs,
        _ => ExitCode::NetworkError,
    }
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let query = cmd.query.unwrap_or_default();

    if query.trim().is_empty() {
        output.info("Discovering movies...");
    } else {
        output.info(format!("Searching for: {}", query));
    }

    match client.list_movies(&query).await {
        Ok(mut movies) => {
            movies.truncate(cmd.limit);
            tracing::info!(query = %query, count = movies.len(), "list command");

            if let Err(e) = output.print(&movies, |m| format_movies(m)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Listing failed: {}", e), api_exit_code(&e)),
    }
}

fn format_movies(movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return "No movies found".to_string();
    }
    movies
        .iter()
        .map(|m| format!("{:>8}  {}", m.id, m))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching details for: {}", cmd.id));

    match client.movie_detail(cmd.id).await {
        Ok(detail) => {
            if let Err(e) = output.print(&detail, format_detail) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Failed to get details: {}", e), api_exit_code(&e)),
    }
}

fn format_detail(detail: &MovieDetail) -> String {
    let mut lines = vec![detail.to_string()];

    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{}\"", tagline));
    }
    if !detail.genres.is_empty() {
        lines.push(detail.genres.join(", "));
    }
    if !detail.overview.is_empty() {
        lines.push(String::new());
        lines.push(detail.overview.clone());
    }

    lines.push(String::new());
    match detail.trailer() {
        Some(video) => lines.push(format!("Trailer: {} ({})", video.name, watch_url(&video.key))),
        None => lines.push("Trailer: none".to_string()),
    }
    lines.join("\n")
}

// =============================================================================
// Trailer Command
// =============================================================================

pub async fn trailer_cmd(
    cmd: TrailerCmd,
    client: &TmdbClient,
    player: &TrailerPlayer,
    output: &Output,
) -> ExitCode {
    let detail = match client.movie_detail(cmd.id).await {
        Ok(detail) => detail,
        Err(e) => return output.error(format!("Failed to get details: {}", e), api_exit_code(&e)),
    };

    let Some(video) = detail.trailer() else {
        return output.error(format!("No trailer for {}", detail.title), ExitCode::NoTrailer);
    };

    let url = match player.player_type() {
        PlayerType::Browser => embed_url(&video.key, &player.options()),
        _ => watch_url(&video.key),
    };

    let mut info = TrailerInfo {
        movie_id: detail.id,
        title: detail.title.clone(),
        key: video.key.clone(),
        name: video.name.clone(),
        site: video.site.clone(),
        url,
        played: false,
    };

    if cmd.play {
        if !player.is_available().await {
            return output.error(
                format!("Player '{}' not found", player.program()),
                ExitCode::PlayerFailed,
            );
        }

        output.info(format!("Playing {} via {}...", video.name, player.player_type()));

        let handle = match player.play(&video.key) {
            Ok(handle) => handle,
            Err(e) => return output.error(e.to_string(), ExitCode::PlayerFailed),
        };
        if let Err(e) = handle.wait().await {
            return output.error(format!("Player failed: {}", e), ExitCode::PlayerFailed);
        }
        info.played = true;
    }

    if let Err(e) = output.print(&info, |t| format!("{}: {}\n{}", t.title, t.name, t.url)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
