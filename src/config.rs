//! Configuration management for TrailerTUI
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/trailertui/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::tmdb::API_BASE_URL;
use crate::api::TmdbClient;
use crate::models::IMAGE_BASE_URL;
use crate::player::{PlayerType, TrailerPlayer};

/// Environment variable holding the TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key (v3)
    pub api_key: Option<String>,
    /// Player used for trailers (mpv, vlc, browser)
    pub player: Option<PlayerType>,
    /// Executable for `player`, when it is not the one on PATH
    pub player_path: Option<String>,
    /// Override for the TMDB API endpoint
    pub api_base_url: Option<String>,
    /// Override for the image CDN base
    pub image_base_url: Option<String>,
    /// HTTP timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// tracing filter directive, e.g. "debug" or "trailertui=trace"
    pub log_level: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/trailertui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trailertui").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from an explicit path, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Resolve the API key:
    /// 1. Explicit override (CLI flag)
    /// 2. Environment variable TMDB_API_KEY
    /// 3. Key from config file
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Option<String> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key_with(cli_key, env_key.as_deref())
    }

    fn resolve_api_key_with(&self, cli_key: Option<&str>, env_key: Option<&str>) -> Option<String> {
        [cli_key, env_key, self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|k| !k.is_empty())
            .map(str::to_string)
    }

    pub fn player(&self) -> PlayerType {
        self.player.unwrap_or_default()
    }

    /// Build the trailer player. A `--player` that differs from the
    /// configured one ignores `player_path`.
    pub fn trailer_player(&self, cli_player: Option<PlayerType>) -> TrailerPlayer {
        let player_type = cli_player.unwrap_or_else(|| self.player());
        let player = TrailerPlayer::new(player_type);
        match self.player_path.as_deref() {
            Some(path) if !path.trim().is_empty() && player_type == self.player() => {
                player.with_program(path.trim())
            }
            _ => player,
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(API_BASE_URL)
    }

    pub fn image_base_url(&self) -> &str {
        self.image_base_url.as_deref().unwrap_or(IMAGE_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a TMDB client from this config
    pub fn tmdb_client(&self, cli_key: Option<&str>) -> TmdbClient {
        let api_key = self.resolve_api_key(cli_key);
        if api_key.is_none() {
            tracing::warn!("no TMDB API key configured; all requests will fail");
        }
        TmdbClient::from_settings(api_key, self.api_base_url(), self.request_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.player(), PlayerType::Mpv);
        assert_eq!(config.api_base_url(), API_BASE_URL);
        assert_eq!(config.image_base_url(), IMAGE_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_api_key_precedence() {
        let config = Config {
            api_key: Some("from_file".into()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_api_key_with(Some("from_cli"), Some("from_env")),
            Some("from_cli".into())
        );
        assert_eq!(
            config.resolve_api_key_with(None, Some("from_env")),
            Some("from_env".into())
        );
        assert_eq!(config.resolve_api_key_with(None, None), Some("from_file".into()));
    }

    #[test]
    fn test_blank_keys_skipped() {
        let config = Config::default();
        assert_eq!(config.resolve_api_key_with(Some(""), Some("  ")), None);
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            api_key: Some("abc123".into()),
            player: Some(PlayerType::Browser),
            player_path: Some("/opt/bin/firefox-open".into()),
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_trailer_player_uses_player_path() {
        let config = Config {
            player: Some(PlayerType::Vlc),
            player_path: Some("/Applications/VLC.app/Contents/MacOS/VLC".into()),
            ..Default::default()
        };

        let player = config.trailer_player(None);
        assert_eq!(player.player_type(), PlayerType::Vlc);
        assert_eq!(player.program(), "/Applications/VLC.app/Contents/MacOS/VLC");

        let same = config.trailer_player(Some(PlayerType::Vlc));
        assert_eq!(same.program(), "/Applications/VLC.app/Contents/MacOS/VLC");
    }

    #[test]
    fn test_cli_player_ignores_other_players_path() {
        let config = Config {
            player: Some(PlayerType::Vlc),
            player_path: Some("/opt/vlc/bin/vlc".into()),
            ..Default::default()
        };

        let player = config.trailer_player(Some(PlayerType::Mpv));
        assert_eq!(player.player_type(), PlayerType::Mpv);
        assert_eq!(player.program(), "mpv");
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "player = 42\n[[[").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("nope.toml")), Config::default());
    }
}
